//! Editing pane for the active file.
//!
//! A plain textarea: every input is sent back as a content update, and the
//! pane is reset whenever another file is shown.

use leptos::prelude::*;
use leptos_icons::Icon;
use webpad_core::Command;

use crate::actions::{self, Job};
use crate::app::AppContext;
use crate::components::icons as ic;

stylance::import_crate_style!(css, "src/components/editor.module.css");

#[component]
pub fn EditorPane() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let path = Memo::new(move |_| ctx.editor.with(|e| e.as_ref().map(|v| v.path.clone())));
    let language = Memo::new(move |_| ctx.editor.with(|e| e.as_ref().map(|v| v.language)));
    let runnable = Signal::derive(move || language.get().is_some_and(|l| l.is_runnable()));

    let on_input = move |ev: leptos::ev::Event| {
        let Some(path) = path.get_untracked() else {
            return;
        };
        let content = event_target_value(&ev);
        actions::execute(ctx, Command::UpdateContent { path, content });
    };

    view! {
        <section class=css::pane>
            <div class=css::tabBar>
                <span class=css::tab>
                    {move || path.get().unwrap_or_else(|| "No file open".to_string())}
                </span>
                <span class=css::language>
                    {move || language.get().map(|l| l.id()).unwrap_or_default()}
                </span>
                <button
                    class=css::run
                    title="Run the active JavaScript file"
                    disabled=move || !runnable.get()
                    on:click=move |_| actions::enqueue(ctx, Job::Run)
                >
                    <Icon icon=ic::RUN />
                    <span>"Run"</span>
                </button>
            </div>

            <Show
                when=move || path.with(Option::is_some)
                fallback=|| view! {
                    <div class=css::placeholder>"Select a file in the explorer or create a new one."</div>
                }
            >
                <textarea
                    class=css::textarea
                    spellcheck="false"
                    autocomplete="off"
                    data-language=move || language.get().map(|l| l.id()).unwrap_or_default()
                    prop:value=move || ctx.editor.with(|e| e.as_ref().map(|v| v.content.clone()).unwrap_or_default())
                    on:input=on_input
                />
            </Show>
        </section>
    }
}
