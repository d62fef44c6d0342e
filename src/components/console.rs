//! Console pane showing run output and shell messages.

use leptos::prelude::*;
use leptos_icons::Icon;
use webpad_core::{ConsoleLevel, ConsoleLine};

use crate::app::AppContext;
use crate::components::icons as ic;

stylance::import_crate_style!(css, "src/components/console.module.css");

fn level_class(level: ConsoleLevel) -> &'static str {
    match level {
        ConsoleLevel::Log => css::log,
        ConsoleLevel::Info => css::info,
        ConsoleLevel::Warn => css::warning,
        ConsoleLevel::Error => css::error,
        ConsoleLevel::Success => css::success,
    }
}

#[component]
pub fn ConsolePane() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let output_ref = NodeRef::<leptos::html::Div>::new();

    // Keep the newest line in view.
    Effect::new(move || {
        ctx.console.track();
        if let Some(el) = output_ref.get() {
            el.set_scroll_top(el.scroll_height());
        }
    });

    view! {
        <section class=css::pane>
            <div class=css::header>
                <span class=css::title>
                    <Icon icon=ic::TERMINAL />
                    "Console"
                </span>
                <button class=css::clear title="Clear console" on:click=move |_| ctx.clear_console()>
                    <Icon icon=ic::ERASER />
                </button>
            </div>
            <div class=css::output node_ref=output_ref>
                <For
                    each=move || ctx.console.with(|c| c.lines().cloned().collect::<Vec<_>>())
                    key=|line| line.id
                    children=move |line| view! { <Line line=line /> }
                />
            </div>
        </section>
    }
}

#[component]
fn Line(line: ConsoleLine) -> impl IntoView {
    view! {
        <div class=format!("{} {}", css::item, level_class(line.level))>
            <span class=css::icon>{line.level.icon()}</span>
            <pre class=css::text>{line.text}</pre>
        </div>
    }
}
