//! Page layout.

use leptos::prelude::*;

use super::console::ConsolePane;
use super::editor::EditorPane;
use super::explorer::Explorer;
use super::toolbar::Toolbar;

stylance::import_crate_style!(css, "src/components/workspace.module.css");

#[component]
pub fn Workspace() -> impl IntoView {
    view! {
        <div class=css::workspace>
            <Toolbar />
            <div class=css::body>
                <aside class=css::sidebar>
                    <Explorer />
                </aside>
                <main class=css::main>
                    <div class=css::editor>
                        <EditorPane />
                    </div>
                    <div class=css::console>
                        <ConsolePane />
                    </div>
                </main>
            </div>
        </div>
    }
}
