//! Toolbar with project-level actions.

use leptos::prelude::*;
use leptos_icons::Icon;
use tracing::warn;
use wasm_bindgen::JsCast;
use web_sys::HtmlInputElement;

use crate::actions::{self, Job};
use crate::app::AppContext;
use crate::components::icons as ic;
use crate::config::APP_NAME;

stylance::import_crate_style!(css, "src/components/toolbar.module.css");

#[component]
pub fn Toolbar() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let folder_input = NodeRef::<leptos::html::Input>::new();

    // `webkitdirectory` is not a typed attribute; set it once mounted.
    Effect::new(move || {
        if let Some(input) = folder_input.get() {
            for attr in ["webkitdirectory", "directory"] {
                if let Err(err) = input.set_attribute(attr, "") {
                    warn!(attr, "folder picker attribute rejected: {:?}", err);
                }
            }
        }
    });

    let on_folder_selected = move |ev: leptos::ev::Event| {
        let Some(input) = ev
            .target()
            .and_then(|target| target.dyn_into::<HtmlInputElement>().ok())
        else {
            return;
        };
        if let Some(selection) = input.files() {
            actions::import(ctx, selection);
        }
        // Allow picking the same folder again.
        input.set_value("");
    };

    let open_picker = move |_| {
        if let Some(input) = folder_input.get() {
            input.click();
        }
    };

    view! {
        <header class=css::toolbar>
            <span class=css::brand>{APP_NAME}</span>

            <div class=css::group>
                <button class=css::button title="New file" on:click=move |_| actions::new_file(ctx)>
                    <Icon icon=ic::NEW_FILE />
                    <span class=css::label>"File"</span>
                </button>
                <button class=css::button title="New folder" on:click=move |_| actions::new_folder(ctx)>
                    <Icon icon=ic::NEW_FOLDER />
                    <span class=css::label>"Folder"</span>
                </button>
            </div>

            <div class=css::group>
                <button class=css::button title="Import a folder" on:click=open_picker>
                    <Icon icon=ic::UPLOAD />
                    <span class=css::label>"Import"</span>
                </button>
                <input
                    node_ref=folder_input
                    class=css::hidden
                    type="file"
                    multiple=true
                    on:change=on_folder_selected
                />
                <button
                    class=css::button
                    title="Download the project as a zip archive"
                    on:click=move |_| actions::enqueue(ctx, Job::Export)
                >
                    <Icon icon=ic::DOWNLOAD />
                    <span class=css::label>"Export"</span>
                </button>
            </div>

            <div class=css::spacer></div>

            <span class=css::status>{move || if ctx.busy.get() { "Saving..." } else { "" }}</span>

            <button
                class=format!("{} {}", css::button, css::danger)
                title="Clear all files and reset the database"
                on:click=move |_| actions::clear_all(ctx)
            >
                <Icon icon=ic::TRASH />
                <span class=css::label>"Clear All"</span>
            </button>
        </header>
    }
}
