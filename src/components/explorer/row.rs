//! Explorer row component.

use leptos::prelude::*;
use leptos_icons::Icon;
use webpad_core::{Command, EntryKind, Language, TreeRow};

use crate::actions;
use crate::app::AppContext;
use crate::components::icons as ic;
use crate::config::EXPLORER_INDENT_PX;

stylance::import_crate_style!(css, "src/components/explorer/explorer.module.css");

#[component]
pub fn ExplorerRow(row: TreeRow) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let is_folder = row.kind == EntryKind::Folder;
    let full_path = row.full_path.clone();
    let indent = format!("padding-left: {}px", 8 + row.depth * EXPLORER_INDENT_PX);

    let path_for_selected = full_path.clone();
    let is_selected = Signal::derive(move || {
        ctx.active
            .with(|active| active.as_deref() == Some(path_for_selected.as_str()))
    });

    let path_for_open = full_path.clone();
    let is_open = Signal::derive(move || {
        is_folder && ctx.open_folders.with(|open| open.contains(&path_for_open))
    });

    let icon = move || {
        if is_folder {
            if is_open.get() { ic::FOLDER_OPEN } else { ic::FOLDER }
        } else {
            ic::file_icon(Language::from_path(&row.full_path))
        }
    };

    let path_for_click = full_path.clone();
    let handle_click = move |_: leptos::ev::MouseEvent| {
        if is_folder {
            ctx.toggle_folder(&path_for_click);
        }
        actions::execute(ctx, Command::Open(path_for_click.clone()));
    };

    let path_for_rename = full_path.clone();
    let path_for_move = full_path.clone();
    let path_for_delete = full_path.clone();

    let row_class = move || {
        if is_selected.get() {
            format!("{} {}", css::row, css::selected)
        } else {
            css::row.to_string()
        }
    };

    let name_class = if is_folder {
        format!("{} {}", css::name, css::nameFolder)
    } else {
        css::name.to_string()
    };

    view! {
        <div
            class=row_class
            style=indent
            role="treeitem"
            tabindex="0"
            aria-selected=move || is_selected.get()
            aria-expanded=move || is_folder.then(|| is_open.get())
            on:click=handle_click
        >
            <span class=css::chevron aria-hidden="true">
                {move || {
                    is_folder.then(|| {
                        let chevron = if is_open.get() { ic::CHEVRON_DOWN } else { ic::CHEVRON_RIGHT };
                        view! { <Icon icon=chevron /> }
                    })
                }}
            </span>
            <span class=css::icon aria-hidden="true">{move || view! { <Icon icon=icon() /> }}</span>
            <span class=name_class>{row.name.clone()}</span>

            <span class=css::actions>
                <button
                    class=css::action
                    title="Rename"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        actions::rename(ctx, path_for_rename.clone());
                    }
                >
                    <Icon icon=ic::EDIT />
                </button>
                <button
                    class=css::action
                    title="Move"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        actions::move_entry(ctx, path_for_move.clone());
                    }
                >
                    <Icon icon=ic::MOVE />
                </button>
                <button
                    class=css::action
                    title="Delete"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        actions::delete(ctx, path_for_delete.clone());
                    }
                >
                    <Icon icon=ic::TRASH />
                </button>
            </span>
        </div>
    }
}
