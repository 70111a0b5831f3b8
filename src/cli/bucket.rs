//! Bucket CLI commands
//!
//! The bucket view-model state is restored from the session before each
//! command and written back afterwards, so a reorder made by one
//! invocation can be saved by the next.

use anyhow::{bail, Result};
use clap::Subcommand;

use super::app::Env;
use super::output::Output;
use super::utils::{or_dash, truncate_str};
use crate::domain::{can_move, BucketElement, BucketId, Direction, ElementId, TeachId};
use crate::sync::{BucketSync, Source, SyncError};

#[derive(Subcommand)]
pub enum BucketCommands {
    /// List buckets
    List,

    /// Create a bucket
    Create {
        /// Bucket name
        name: String,
    },

    /// Make a bucket the one used for simulation runs
    Best {
        /// Bucket ID
        id: BucketId,
    },

    /// Select the bucket to work on
    Select {
        /// Bucket ID
        id: BucketId,

        /// Drop unsaved priority changes of the current bucket
        #[arg(long)]
        discard: bool,
    },

    /// Show the selected bucket's courses in priority order
    Show,

    /// Add a lecture to the selected bucket
    Add {
        /// Lecture teach ID
        teach_id: TeachId,
    },

    /// Set the fallback lecture for a course
    Alternate {
        /// Bucket element ID
        element_id: ElementId,

        /// Teach ID of the fallback lecture
        teach_id: TeachId,
    },

    /// Move a course one place up or down (local until saved)
    ///
    /// Examples:
    ///   regsim bucket move 2 up
    ///   regsim bucket move 1 down
    Move {
        /// Priority shown by 'bucket show' (1 = highest)
        position: usize,

        /// up or down
        direction: Direction,
    },

    /// Send the local priority order to the backend
    Save,

    /// Throw away unsaved priority changes
    Discard,
}

pub fn run(cmd: BucketCommands, env: &Env) -> Result<()> {
    match cmd {
        BucketCommands::List => with_sync(env, list_buckets),
        BucketCommands::Create { name } => with_sync(env, |sync, output| create_bucket(sync, output, &name)),
        BucketCommands::Best { id } => with_sync(env, |sync, output| set_best(sync, output, id)),
        BucketCommands::Select { id, discard } => {
            with_sync(env, |sync, output| select_bucket(sync, output, id, discard))
        }
        BucketCommands::Show => with_sync(env, show_bucket),
        BucketCommands::Add { teach_id } => with_sync(env, |sync, output| add_element(sync, output, teach_id)),
        BucketCommands::Alternate { element_id, teach_id } => {
            with_sync(env, |sync, output| set_alternate(sync, output, element_id, teach_id))
        }
        BucketCommands::Move { position, direction } => {
            with_sync(env, |sync, output| move_element(sync, output, position, direction))
        }
        BucketCommands::Save => with_sync(env, save),
        BucketCommands::Discard => with_sync(env, discard),
    }
}

/// Runs `f` on the restored view-model and persists its state, even when `f` fails
fn with_sync<F>(env: &Env, f: F) -> Result<()>
where
    F: FnOnce(&mut BucketSync<'_>, &Output) -> Result<()>,
{
    let mut session = env.load_session()?;
    let backend = env.backend(&session)?;
    let mut sync = BucketSync::restore(backend.as_ref(), std::mem::take(&mut session.buckets));

    let result = f(&mut sync, &env.output);

    session.buckets = sync.into_state();
    env.save_session(&session)?;
    result
}

fn list_buckets(sync: &mut BucketSync<'_>, output: &Output) -> Result<()> {
    let source = sync.fetch_buckets();
    let selected = sync.selected();

    if output.is_json() {
        output.data(&serde_json::json!({
            "buckets": sync.buckets(),
            "selected": selected,
            "source": source,
        }));
        return Ok(());
    }

    output.source_notice(source);
    if sync.buckets().is_empty() {
        println!("No buckets yet. Create one with 'regsim bucket create <name>'.");
        return Ok(());
    }

    println!("  {:<8} {:<30} {:<6} CREATED", "ID", "NAME", "BEST");
    println!("{}", "-".repeat(64));
    for bucket in sync.buckets() {
        let marker = if selected == Some(bucket.id) { "*" } else { " " };
        println!(
            "{} {:<8} {:<30} {:<6} {}",
            marker,
            bucket.id,
            truncate_str(&bucket.name, 30),
            if bucket.is_best { "yes" } else { "" },
            bucket.created_at.format("%Y-%m-%d")
        );
    }

    if sync.is_dirty() {
        println!();
        println!("Bucket {} has unsaved priority changes.", selected.unwrap_or_default());
    }

    Ok(())
}

fn create_bucket(sync: &mut BucketSync<'_>, output: &Output, name: &str) -> Result<()> {
    sync.create_bucket(name)?;
    output.success(&format!("Created bucket '{}'", name.trim()));
    Ok(())
}

fn set_best(sync: &mut BucketSync<'_>, output: &Output, id: BucketId) -> Result<()> {
    sync.set_best(id)?;

    let best = sync.buckets().iter().find(|b| b.is_best).map(|b| b.id);
    if best == Some(id) {
        output.success(&format!("Bucket {} is now the best bucket", id));
    } else {
        output.warn(&format!(
            "Request accepted, but the backend lists {} as the best bucket",
            best.map_or_else(|| "no bucket".to_string(), |b| b.to_string())
        ));
    }
    Ok(())
}

fn select_bucket(sync: &mut BucketSync<'_>, output: &Output, id: BucketId, discard: bool) -> Result<()> {
    // Reselecting reloads from the backend, so the current bucket counts too
    if sync.is_dirty() && !discard {
        bail!(
            "Bucket {} has unsaved priority changes. Run 'regsim bucket save' or pass --discard.",
            sync.selected().unwrap_or_default()
        );
    }

    sync.fetch_buckets();
    let source = sync.select_bucket(Some(id));
    output.verbose_ctx("bucket", &format!("selected {} ({:?})", id, source));
    print_elements(sync, output, source);
    Ok(())
}

fn show_bucket(sync: &mut BucketSync<'_>, output: &Output) -> Result<()> {
    let bucket = sync.selected().ok_or(SyncError::NoBucketSelected)?;

    // A local draft is shown as is; otherwise refresh from the backend
    let source = if sync.is_dirty() {
        sync.state().elements_source
    } else {
        sync.fetch_elements(bucket)
    };
    print_elements(sync, output, source);
    Ok(())
}

fn add_element(sync: &mut BucketSync<'_>, output: &Output, teach_id: TeachId) -> Result<()> {
    sync.add_element(teach_id)?;
    output.success(&format!(
        "Added lecture {} to bucket {}",
        teach_id,
        sync.selected().unwrap_or_default()
    ));
    Ok(())
}

fn set_alternate(sync: &mut BucketSync<'_>, output: &Output, element: ElementId, teach_id: TeachId) -> Result<()> {
    if let (Some(bucket), false) = (sync.selected(), sync.is_dirty()) {
        sync.fetch_elements(bucket);
    }

    sync.set_alternate(element, teach_id)?;
    output.success(&format!("Lecture {} is now the alternate for element {}", teach_id, element));
    Ok(())
}

fn move_element(sync: &mut BucketSync<'_>, output: &Output, position: usize, direction: Direction) -> Result<()> {
    sync.selected().ok_or(SyncError::NoBucketSelected)?;

    let len = sync.elements().len();
    if position == 0 || position > len {
        if len == 0 {
            bail!("The selected bucket is empty");
        }
        bail!("Position {} is out of range (1-{})", position, len);
    }

    if can_move(len, position - 1, direction) {
        sync.reorder(position - 1, direction);
    } else {
        output.warn(&format!("Position {} cannot move {}", position, direction));
    }

    let source = sync.state().elements_source;
    print_elements(sync, output, source);
    Ok(())
}

fn save(sync: &mut BucketSync<'_>, output: &Output) -> Result<()> {
    let bucket = sync.selected().ok_or(SyncError::NoBucketSelected)?;
    if !sync.is_dirty() {
        output.success("Nothing to save");
        return Ok(());
    }

    sync.save()?;
    output.success(&format!("Saved priorities for bucket {}", bucket));
    Ok(())
}

fn discard(sync: &mut BucketSync<'_>, output: &Output) -> Result<()> {
    let had_changes = sync.is_dirty();
    let source = sync.discard()?;
    output.source_notice(source);

    if had_changes {
        output.success("Discarded unsaved priority changes");
    } else {
        output.success("No unsaved changes");
    }
    Ok(())
}

fn print_elements(sync: &BucketSync<'_>, output: &Output, source: Source) {
    let bucket = sync.selected();

    if output.is_json() {
        output.data(&serde_json::json!({
            "bucket": bucket,
            "elements": sync.elements(),
            "dirty": sync.is_dirty(),
            "source": source,
        }));
        return;
    }

    output.source_notice(source);
    let name = sync
        .selected_bucket()
        .map(|b| b.name.clone())
        .unwrap_or_else(|| format!("#{}", bucket.unwrap_or_default()));
    println!("Bucket: {}", name);

    if sync.elements().is_empty() {
        println!("Bucket is empty. Add lectures with 'regsim bucket add <teachId>'.");
        return;
    }

    println!();
    println!(
        "{:>3} {:<8} {:<8} {:<28} {:<14} {:<6} ALTERNATE",
        "#", "ELEMENT", "TEACH", "COURSE", "PROFESSOR", "MAJOR"
    );
    println!("{}", "-".repeat(86));
    for element in sync.elements() {
        print_element(element);
    }

    if sync.is_dirty() {
        println!();
        println!("Unsaved changes. Run 'regsim bucket save' to keep them.");
    }
}

fn print_element(element: &BucketElement) {
    println!(
        "{:>3} {:<8} {:<8} {:<28} {:<14} {:<6} {}",
        element.priority,
        element.element_id,
        element.teach_id,
        truncate_str(&element.course_name, 28),
        truncate_str(&element.professor_name, 14),
        if element.is_major() { "yes" } else { "" },
        or_dash(element.alternate_label())
    );
}
