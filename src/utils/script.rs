//! Running the active file as JavaScript.
//!
//! The code is evaluated with `eval` in the page itself. While it runs,
//! `console.log/info/warn/error` are wrapped so their output is captured
//! (and still forwarded to the real console). There is no sandbox.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Array, Function, Reflect};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use webpad_core::{ConsoleLevel, ConsoleLine};

const CAPTURED_METHODS: [&str; 4] = ["log", "info", "warn", "error"];

/// Evaluate `code` and return what it printed.
///
/// A thrown error ends the run and is appended as an error line.
pub fn run_script(code: &str) -> Vec<ConsoleLine> {
    let captured = Rc::new(RefCell::new(Vec::new()));

    let console = match Reflect::get(&js_sys::global(), &JsValue::from_str("console")) {
        Ok(console) if console.is_object() => console,
        _ => return vec![ConsoleLine::error("console is not available")],
    };

    let mut restore = Vec::with_capacity(CAPTURED_METHODS.len());
    let mut closures = Vec::with_capacity(CAPTURED_METHODS.len());

    for method in CAPTURED_METHODS {
        let key = JsValue::from_str(method);
        let Ok(original) = Reflect::get(&console, &key) else {
            continue;
        };
        let Some(original_fn) = original.dyn_ref::<Function>().cloned() else {
            continue;
        };

        let sink = Rc::clone(&captured);
        let this = console.clone();
        let level = ConsoleLevel::from_method(method);
        let closure = Closure::<dyn Fn(Array)>::new(move |args: Array| {
            let texts: Vec<String> = args.iter().map(|arg| format_arg(&arg)).collect();
            sink.borrow_mut().push(ConsoleLine::from_args(level, &texts));
            let _ = original_fn.apply(&this, &args);
        });

        let wrapper = Function::new_with_args("sink", "return (...args) => sink(args);")
            .call1(&JsValue::NULL, closure.as_ref());
        if let Ok(wrapper) = wrapper
            && Reflect::set(&console, &key, &wrapper).is_ok()
        {
            restore.push((key, original));
            closures.push(closure);
        }
    }

    let result = js_sys::eval(code);

    for (key, original) in restore {
        let _ = Reflect::set(&console, &key, &original);
    }
    drop(closures);

    let mut lines = captured.take();
    if let Err(err) = result {
        lines.push(ConsoleLine::error(js_error_message(&err)));
    }
    lines
}

/// Render one `console.*` argument the way the console pane shows it.
///
/// Objects are pretty-printed as JSON; everything else is stringified.
fn format_arg(arg: &JsValue) -> String {
    if let Some(text) = arg.as_string() {
        return text;
    }
    if let Some(number) = arg.as_f64() {
        return number.to_string();
    }
    if let Some(flag) = arg.as_bool() {
        return flag.to_string();
    }
    if arg.is_undefined() {
        return "undefined".to_string();
    }
    if arg.is_null() {
        return "null".to_string();
    }
    if let Some(err) = arg.dyn_ref::<js_sys::Error>() {
        return String::from(err.to_string());
    }
    if arg.is_object() {
        if let Some(json) = js_sys::JSON::stringify_with_replacer_and_space(
            arg,
            &JsValue::NULL,
            &JsValue::from_f64(2.0),
        )
        .ok()
        .and_then(|json| json.as_string())
        {
            return json;
        }
    }
    format!("{:?}", arg)
}

/// Best-effort message of a thrown JS value.
pub fn js_error_message(err: &JsValue) -> String {
    if let Some(err) = err.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    err.as_string().unwrap_or_else(|| format!("{:?}", err))
}
