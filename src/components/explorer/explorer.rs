//! Main explorer component.

use leptos::prelude::*;

use super::ExplorerRow;
use crate::app::AppContext;

stylance::import_crate_style!(css, "src/components/explorer/explorer.module.css");

/// Project tree, showing the children of expanded folders only.
#[component]
pub fn Explorer() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let rows = Memo::new(move |_| {
        let open = ctx.open_folders.get();
        ctx.tree.with(|tree| tree.visible_rows(|folder| open.contains(folder)))
    });

    view! {
        <nav class=css::explorer role="tree" aria-label="Project files">
            <div class=css::heading>"Explorer"</div>
            <Show
                when=move || rows.with(|r| !r.is_empty())
                fallback=|| view! { <div class=css::empty>"No files yet"</div> }
            >
                <For
                    each=move || rows.get()
                    key=|row| (row.full_path.clone(), row.depth)
                    children=move |row| view! { <ExplorerRow row=row /> }
                />
            </Show>
        </nav>
    }
}
