//! Command execution for the native shell.

use crate::cli::{Cli, Command, ExportArgs, SegmentsCommand, SetsCommand};
use crate::config::{AppConfig, clamp_dimension};
use crate::deliver::write_artifact;
use crate::error::{AppError, AppResult};
use std::io::{self, Write};
use std::sync::Arc;
use swatchset_core::storage::{FileStorage, Storage};
use swatchset_core::{Notice, Notifier, PaletteStore, SegmentDraft, SegmentSet, SegmentUpdate, contrast_text_color};
use swatchset_render::{ExportOptions, Exporter, FontData};

/// Prints notices to the terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notice: &Notice) {
        let message = match notice.title() {
            Some(title) => format!("{}: {}", title, notice),
            None => notice.to_string(),
        };
        if notice.is_destructive() {
            eprintln!("{}", message);
        } else {
            println!("{}", message);
        }
    }
}

/// Load config and state, then execute the parsed command.
pub fn run(cli: Cli) -> AppResult<()> {
    let config = AppConfig::load(cli.config.as_deref())?;

    let storage = match cli.data_dir.as_ref().or(config.data_dir.as_ref()) {
        Some(dir) => FileStorage::new(dir.clone())?,
        None => FileStorage::default_location()?,
    };
    log::debug!("Palette state in {}", storage.base_path().display());

    let mut store = PaletteStore::new(Arc::new(storage)).with_notifier(ConsoleNotifier);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    execute(&mut store, cli.command, &config, &mut out)
}

/// Execute one command against `store`, writing listings to `out`.
pub fn execute<S: Storage, W: Write>(
    store: &mut PaletteStore<S>,
    command: Command,
    config: &AppConfig,
    out: &mut W,
) -> AppResult<()> {
    match command {
        Command::Sets(command) => run_sets(store, command, out),
        Command::Segments(command) => run_segments(store, command, out),
        Command::Export(args) => run_export(store, args, config, out),
    }
}

fn run_sets<S: Storage, W: Write>(store: &mut PaletteStore<S>, command: SetsCommand, out: &mut W) -> AppResult<()> {
    match command {
        SetsCommand::List => {
            for set in store.sets() {
                let marker = if set.id == store.active_set_id() { '*' } else { ' ' };
                writeln!(out, "{} {}  {} ({} segments)", marker, set.id, set.name, set.len())?;
            }
        }
        SetsCommand::Create { name } => {
            store
                .create_set(&name)
                .ok_or_else(|| AppError::Rejected("Set name cannot be empty".to_string()))?;
        }
        SetsCommand::Rename { set, name } => {
            let id = resolve_set(store, &set)?;
            if !store.update_set_name(&id, &name) {
                return Err(AppError::Rejected("Set name cannot be empty".to_string()));
            }
        }
        SetsCommand::Delete { set } => {
            let id = resolve_set(store, &set)?;
            store.delete_set(&id)?;
        }
        SetsCommand::Use { set } => {
            let id = resolve_set(store, &set)?;
            store.set_active_set(&id);
            writeln!(out, "Active set: {}", store.active_set().name)?;
        }
    }
    Ok(())
}

fn run_segments<S: Storage, W: Write>(
    store: &mut PaletteStore<S>,
    command: SegmentsCommand,
    out: &mut W,
) -> AppResult<()> {
    match command {
        SegmentsCommand::List => {
            let set = store.active_set();
            writeln!(out, "{}", set.name)?;
            for (i, segment) in set.segments.iter().enumerate() {
                writeln!(
                    out,
                    "{:>3}. {}  {}  (text {}, id {})",
                    i + 1,
                    segment.color,
                    segment.title,
                    contrast_text_color(&segment.color),
                    segment.id
                )?;
            }
        }
        SegmentsCommand::Add { title, color } => {
            let id = store
                .add_segment(SegmentDraft::new(color, title))
                .ok_or_else(|| AppError::Rejected("Segment color and title are required".to_string()))?;
            writeln!(out, "Added segment {}", id)?;
        }
        SegmentsCommand::Update { segment, color, title } => {
            let update = SegmentUpdate { color, title };
            if update.is_empty() {
                return Err(AppError::Rejected("Nothing to update: pass --color and/or --title".to_string()));
            }
            let id = resolve_segment(store.active_set(), &segment)?;
            store.update_segment(&id, update);
        }
        SegmentsCommand::Delete { segments } => {
            let ids = resolve_segments(store.active_set(), &segments)?;
            let removed = if let [id] = ids.as_slice() {
                usize::from(store.delete_segment(id))
            } else {
                select(store, &ids);
                store.delete_selected()
            };
            writeln!(out, "Deleted {} segment(s)", removed)?;
        }
        SegmentsCommand::Move { from, to } => {
            let (Some(old_index), Some(new_index)) = (from.checked_sub(1), to.checked_sub(1)) else {
                return Err(AppError::Rejected("Positions start at 1".to_string()));
            };
            if !store.reorder_segments(old_index, new_index) {
                return Err(AppError::Rejected(format!(
                    "Position out of range (set has {} segments)",
                    store.active_set().len()
                )));
            }
        }
    }
    Ok(())
}

fn run_export<S: Storage, W: Write>(
    store: &mut PaletteStore<S>,
    args: ExportArgs,
    config: &AppConfig,
    out: &mut W,
) -> AppResult<()> {
    let options = export_options(&args, config);

    if !args.select.is_empty() {
        let ids = resolve_segments(store.active_set(), &args.select)?;
        select(store, &ids);
    }

    let exporter = if options.show_titles {
        Exporter::new(FontData::discover(config.font_path.as_deref(), config.bold_font_path.as_deref()))
    } else {
        Exporter::default()
    };
    let artifact = exporter.export_active_set(store, &options)?;

    let dir = args.out.as_deref().unwrap_or(&config.output_dir);
    let path = write_artifact(&artifact, dir)?;
    store.notify(Notice::ExportSucceeded {
        file_name: artifact.file_name,
    });
    writeln!(out, "{}", path.display())?;
    Ok(())
}

/// Merge command-line overrides onto the configured defaults.
fn export_options(args: &ExportArgs, config: &AppConfig) -> ExportOptions {
    let defaults = config.export;
    ExportOptions {
        width: clamp_dimension(args.width.unwrap_or(defaults.width)),
        height: clamp_dimension(args.height.unwrap_or(defaults.height)),
        orientation: args.orientation.map(Into::into).unwrap_or(defaults.orientation),
        show_titles: defaults.show_titles && !args.no_titles,
    }
}

/// Replace the selection with exactly `ids`.
fn select<S: Storage>(store: &mut PaletteStore<S>, ids: &[String]) {
    if !store.selection_mode() {
        store.toggle_selection_mode();
    }
    store.deselect_all();
    for id in ids {
        store.toggle_segment_selection(id);
    }
}

/// Find a set by id, then by (case-insensitive) name.
fn resolve_set<S: Storage>(store: &PaletteStore<S>, key: &str) -> AppResult<String> {
    let sets = store.sets();
    sets.iter()
        .find(|set| set.id == key)
        .or_else(|| sets.iter().find(|set| set.name.eq_ignore_ascii_case(key.trim())))
        .map(|set| set.id.clone())
        .ok_or_else(|| AppError::UnknownSet(key.to_string()))
}

/// Find a segment by id, then by 1-based position.
fn resolve_segment(set: &SegmentSet, key: &str) -> AppResult<String> {
    if let Some(segment) = set.segment(key) {
        return Ok(segment.id.clone());
    }
    key.parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| set.segments.get(i))
        .map(|segment| segment.id.clone())
        .ok_or_else(|| AppError::UnknownSegment(key.to_string()))
}

/// Resolve every key, dropping duplicates but keeping first-seen order.
fn resolve_segments(set: &SegmentSet, keys: &[String]) -> AppResult<Vec<String>> {
    let mut ids: Vec<String> = Vec::with_capacity(keys.len());
    for key in keys {
        let id = resolve_segment(set, key)?;
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    Ok(ids)
}
