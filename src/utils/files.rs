//! Reading a directory selection from an `<input webkitdirectory>`.

use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, FileList};
use webpad_core::{ImportReadError, ImportedFile};

use super::script::js_error_message;

/// Read every selected file as text.
///
/// Stops at the first file that cannot be read; the import is abandoned at
/// that point anyway.
pub async fn read_selection(files: &FileList) -> Vec<Result<ImportedFile, ImportReadError>> {
    let mut out = Vec::with_capacity(files.length() as usize);

    for index in 0..files.length() {
        let Some(file) = files.get(index) else {
            continue;
        };
        let path = relative_path(&file);

        let entry = match JsFuture::from(file.text()).await {
            Ok(text) => match text.as_string() {
                Some(content) => Ok(ImportedFile::new(path, content)),
                None => Err(ImportReadError::new(path, "content is not text")),
            },
            Err(err) => Err(ImportReadError::new(path, js_error_message(&err))),
        };

        let failed = entry.is_err();
        out.push(entry);
        if failed {
            break;
        }
    }

    out
}

/// Path of `file` within the picked directory, falling back to its name.
fn relative_path(file: &File) -> String {
    js_sys::Reflect::get(file, &JsValue::from_str("webkitRelativePath"))
        .ok()
        .and_then(|value| value.as_string())
        .filter(|path| !path.is_empty())
        .unwrap_or_else(|| file.name())
}
