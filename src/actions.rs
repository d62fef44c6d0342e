//! User actions.
//!
//! Everything that touches the project is queued as a [`Job`] and run in
//! order by a single drain task, so an edit typed while a save is still in
//! flight is applied after it instead of being lost.

use std::collections::HashSet;

use leptos::prelude::*;
use tracing::{info, warn};
use wasm_bindgen_futures::spawn_local;
use web_sys::FileList;
use webpad_core::path;
use webpad_core::{
    Command, ConsoleLine, ImportReadError, ImportedFile, PersistenceError, Project, ZipSink,
};

use crate::app::{AppContext, Backend};
use crate::config::EXPORT_MIME;
use crate::utils::{dom, files, format, script};

/// A queued operation on the project.
pub enum Job {
    Command(Command),
    Import(Vec<Result<ImportedFile, ImportReadError>>),
    Export,
    Run,
    Reset,
}

// ============================================================================
// Startup
// ============================================================================

/// Load the saved project (or seed a new one) and hand it to the context.
pub fn boot(ctx: AppContext) {
    spawn_local(async move {
        let (project, report) = Project::open(Backend::default()).await;

        if let Some(err) = report.load_error {
            ctx.push_console(ConsoleLine::error(format!(
                "Could not load the saved project: {}",
                err
            )));
        }
        report_persist(ctx, report.persist_error);

        ctx.editor.set(project.editor_view());
        ctx.restore_project(project);
        drain(ctx);
    });
}

// ============================================================================
// Queue
// ============================================================================

/// Queue a job and start the drain task if it is not already running.
pub fn enqueue(ctx: AppContext, job: Job) {
    ctx.jobs.update_value(|jobs| {
        // Consecutive keystrokes in one file only need the latest content.
        if let Job::Command(Command::UpdateContent { path: next, .. }) = &job
            && let Some(Job::Command(Command::UpdateContent { path: last, .. })) = jobs.back()
            && last == next
        {
            jobs.pop_back();
        }
        jobs.push_back(job);
    });
    drain(ctx);
}

pub fn execute(ctx: AppContext, command: Command) {
    enqueue(ctx, Job::Command(command));
}

fn drain(ctx: AppContext) {
    // Busy: the running drain task will pick the job up.
    let Some(mut project) = ctx.take_project() else {
        return;
    };

    spawn_local(async move {
        while let Some(job) = ctx.jobs.try_update_value(|jobs| jobs.pop_front()).flatten() {
            run_job(ctx, &mut project, job).await;
            ctx.sync(project.session());
        }
        ctx.restore_project(project);
    });
}

async fn run_job(ctx: AppContext, project: &mut Project<Backend>, job: Job) {
    match job {
        Job::Command(command) => {
            let label = command.to_string();
            match project.execute(command).await {
                Ok(outcome) => {
                    ctx.apply_editor(outcome.result.editor);
                    report_persist(ctx, outcome.persist_error);
                }
                Err(err) => {
                    warn!(command = %label, "rejected: {}", err);
                    ctx.push_console(ConsoleLine::error(err.to_string()));
                }
            }
        }
        Job::Import(selection) => match project.import_directory(selection).await {
            Ok(outcome) => {
                ctx.open_folders.set(HashSet::new());
                ctx.apply_editor(outcome.result);
                ctx.push_console(ConsoleLine::success(format!(
                    "Imported {} files",
                    project.store().file_count()
                )));
                report_persist(ctx, outcome.persist_error);
            }
            Err(err) => ctx.push_console(ConsoleLine::error(err.to_string())),
        },
        Job::Export => export(ctx, project),
        Job::Run => run_active(ctx, project),
        Job::Reset => {
            let result = project.reset().await;
            ctx.editor.set(None);
            ctx.open_folders.set(HashSet::new());
            ctx.clear_console();
            match result {
                Ok(()) => ctx.push_console(ConsoleLine::success("All files have been cleared")),
                Err(err) => report_persist(ctx, Some(err)),
            }
        }
    }
}

fn report_persist(ctx: AppContext, err: Option<PersistenceError>) {
    if let Some(err) = err {
        ctx.push_console(ConsoleLine::error(format!("Changes were not saved: {}", err)));
    }
}

// ============================================================================
// Jobs
// ============================================================================

fn export(ctx: AppContext, project: &Project<Backend>) {
    let bytes = match project.export_archive(Some(ZipSink::new())) {
        Ok(bytes) => bytes,
        Err(err) => {
            ctx.push_console(ConsoleLine::error(err.to_string()));
            return;
        }
    };

    let name = format::archive_name(&dom::today_iso());
    match dom::download_bytes(&bytes, &name, EXPORT_MIME) {
        Ok(()) => info!(file = %name, bytes = bytes.len(), "archive downloaded"),
        Err(err) => ctx.push_console(ConsoleLine::error(format!(
            "Failed to export: {}",
            script::js_error_message(&err)
        ))),
    }
}

fn run_active(ctx: AppContext, project: &Project<Backend>) {
    let Some(view) = project.editor_view() else {
        ctx.push_console(ConsoleLine::error("Open a file to run it"));
        return;
    };
    if !view.language.is_runnable() {
        ctx.push_console(ConsoleLine::error(format!(
            "Cannot run '{}': only JavaScript files can be run",
            view.path
        )));
        return;
    }

    ctx.clear_console();
    ctx.push_lines(script::run_script(&view.content));
}

// ============================================================================
// Prompts
// ============================================================================

/// Folder new entries go into: the selected folder, or the selected file's.
fn target_folder(ctx: AppContext) -> String {
    path::enclosing_folder(ctx.active.get_untracked().as_deref())
}

pub fn new_file(ctx: AppContext) {
    let parent = target_folder(ctx);
    let message = format!("New file in {}", format::display_path(&parent));
    if let Some(name) = dom::prompt(&message, "") {
        execute(ctx, Command::CreateFile { parent, name });
    }
}

pub fn new_folder(ctx: AppContext) {
    let parent = target_folder(ctx);
    let message = format!("New folder in {}", format::display_path(&parent));
    if let Some(name) = dom::prompt(&message, "") {
        if let Some(folder) = path::validate_name(&name).ok().map(|n| path::join(&parent, &n)) {
            ctx.open_folders.update(|open| {
                open.insert(path::as_folder(&folder));
            });
        }
        execute(ctx, Command::CreateFolder { parent, name });
    }
}

pub fn rename(ctx: AppContext, target: String) {
    let current = path::name(&target).to_string();
    if let Some(new_name) = dom::prompt(&format!("Rename '{}' to", current), &current) {
        execute(
            ctx,
            Command::Rename {
                path: target,
                new_name,
            },
        );
    }
}

pub fn move_entry(ctx: AppContext, target: String) {
    let current = path::parent_folder(&target);
    let message = format!("Move '{}' into folder (empty for root)", path::name(&target));
    let Some(window) = dom::window() else {
        return;
    };
    // An empty answer is meaningful here (the root), so no dom::prompt.
    if let Ok(Some(answer)) = window.prompt_with_message_and_default(&message, &current) {
        execute(
            ctx,
            Command::Move {
                path: target,
                new_parent: answer.trim().to_string(),
            },
        );
    }
}

pub fn delete(ctx: AppContext, target: String) {
    let question = if path::is_folder(&target) {
        format!("Delete folder '{}' and everything in it?", target)
    } else {
        format!("Delete '{}'?", target)
    };
    if !dom::confirm(&question) {
        return;
    }

    let command = if path::is_folder(&target) {
        Command::DeleteFolder(target)
    } else {
        Command::DeleteFile(target)
    };
    execute(ctx, command);
}

pub fn clear_all(ctx: AppContext) {
    if dom::confirm("Are you sure you want to clear all files? This cannot be undone.") {
        enqueue(ctx, Job::Reset);
    }
}

/// Read a directory selection and queue its import.
pub fn import(ctx: AppContext, selection: FileList) {
    if selection.length() == 0 {
        return;
    }
    spawn_local(async move {
        let files = files::read_selection(&selection).await;
        enqueue(ctx, Job::Import(files));
    });
}
