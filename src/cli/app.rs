//! CLI module for the swiftnotes application
//!
//! This module translates command-line gestures into session actions and
//! renders the resulting view to the terminal.
use std::{
    fs::{read_to_string, OpenOptions},
    io::{stdin, stdout, Write},
    path::{Path, PathBuf},
    process::Command,
};

use chrono::Local;
use console::style;
use log::{debug, info};
use shell_words::split;
use tempfile::Builder;

use crate::{
    content_preview, Action, Cli, Commands, Config, JsonFileStorage, Note, NoteInput, NoteStore,
    NotesError, Projection, Result, Session, Stats,
};

const PREVIEW_CHARS: usize = 100;

/// Wires a parsed `Cli` to configuration, storage and the app.
pub fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.clone().unwrap_or_else(Config::default_path);
    let config = Config::load(&config_path)?;

    if let Commands::Config { show, set, reset } = &cli.command {
        return handle_config(config, &config_path, *show, set.as_deref(), *reset);
    }

    let data_file = cli.data_file.clone().unwrap_or_else(|| config.data_file.clone());
    debug!("Using notes file {}", data_file.display());

    let store = NoteStore::open(JsonFileStorage::new(data_file))?
        .with_default_priority(config.default_priority.clone());
    let mut app = App::new(Session::new(store), config, cli.verbose);
    app.run(cli.command)
}

fn handle_config(
    mut config: Config,
    path: &Path,
    show: bool,
    set: Option<&str>,
    reset: bool,
) -> Result<()> {
    if reset {
        config = Config::default();
        config.save(path)?;
        println!("Configuration reset to defaults.");
    }

    if let Some(assignment) = set {
        config.set(assignment)?;
        config.save(path)?;
        println!("Configuration updated.");
    }

    if show || (!reset && set.is_none()) {
        println!("# {}", path.display());
        println!("{}", serde_json::to_string_pretty(&config)?);
    }

    Ok(())
}

/// CLI Application handler - processes CLI commands against one session
pub struct App {
    /// The note session (store plus filters)
    session: Session<JsonFileStorage>,

    /// Application configuration
    config: Config,

    /// Whether to display verbose output
    verbose: bool,
}

impl App {
    pub fn new(session: Session<JsonFileStorage>, config: Config, verbose: bool) -> Self {
        Self {
            session,
            config,
            verbose,
        }
    }

    /// Run the CLI application with the given command
    pub fn run(&mut self, command: Commands) -> Result<()> {
        match command {
            Commands::New {
                title,
                body,
                due,
                priority,
                tags,
                edit,
                file,
            } => {
                let body = self.resolve_body(title.as_deref(), body, file, edit, "")?;
                let input = NoteInput {
                    title,
                    body,
                    due: due.map(Some),
                    priority,
                    tags,
                };
                self.create_note(input)?
            }

            Commands::Edit {
                id,
                title,
                body,
                due,
                clear_due,
                priority,
                tags,
                edit,
                file,
            } => {
                let existing = self.find_note(&id)?;
                let body =
                    self.resolve_body(Some(existing.title.as_str()), body, file, edit, &existing.body)?;
                let due = if clear_due { Some(None) } else { due.map(Some) };
                let input = NoteInput {
                    title,
                    body,
                    due,
                    priority,
                    tags,
                };
                self.edit_note(id, input)?
            }

            Commands::Delete { id, force } => self.handle_delete(id, force)?,

            Commands::Toggle { id } => self.toggle_note(id)?,

            Commands::View { id, json } => self.view_note(&id, json)?,

            Commands::List {
                hide_completed,
                priority,
                tag,
                search,
                sort,
                json,
            } => {
                let mut actions = vec![
                    Action::ShowCompleted(!hide_completed),
                    Action::FilterPriority(priority),
                    Action::Sort(sort),
                ];
                if let Some(tag) = tag {
                    actions.push(Action::SelectTag(tag));
                }
                if let Some(search) = search {
                    actions.push(Action::Search(search));
                }
                self.list_notes(actions, json)?
            }

            Commands::Tags { json } => self.list_tags(json)?,

            Commands::Stats => self.show_stats(),

            Commands::Config { .. } => {
                return Err(NotesError::ApplicationError {
                    message: "Configuration is handled before the notes are opened".to_string(),
                })
            }
        }

        Ok(())
    }

    fn create_note(&mut self, input: NoteInput) -> Result<()> {
        let update = self.session.dispatch(Action::Create(input))?;
        if let Some(note) = update.changed {
            println!("Note created with ID: {}", note.id);
            if self.verbose {
                self.print_card(&note, true);
            }
        }
        Ok(())
    }

    fn edit_note(&mut self, id: String, input: NoteInput) -> Result<()> {
        let update = self.session.dispatch(Action::Update { id, input })?;
        if let Some(note) = update.changed {
            println!("Note '{}' ({}) updated.", note.title, note.id);
            if self.verbose {
                self.print_card(&note, true);
            }
        }
        Ok(())
    }

    fn toggle_note(&mut self, id: String) -> Result<()> {
        let update = self.session.dispatch(Action::ToggleComplete(id))?;
        if let Some(note) = update.changed {
            let state = if note.completed { "done" } else { "not done" };
            println!("Note '{}' ({}) marked {}.", note.title, note.id, state);
            println!(
                "{} of {} notes completed.",
                update.projection.stats.completed_count, update.projection.stats.total_count
            );
        }
        Ok(())
    }

    fn handle_delete(&mut self, id: String, force: bool) -> Result<()> {
        let note = self.find_note(&id)?;

        if !force {
            println!("You are about to delete the following note:");
            println!("ID:     {}", note.id);
            println!("Title:  {}", note.title);
            if !note.tags.is_empty() {
                println!("Tags:   {}", note.tags.join(", "));
            }
            let preview = content_preview(&note.body, PREVIEW_CHARS);
            if !preview.is_empty() {
                println!("\n{}", preview);
            }

            println!("\nThis action cannot be undone!");
            print!("Are you sure you want to delete this note? [y/N]: ");
            stdout().flush().map_err(NotesError::Io)?;

            let mut input = String::new();
            stdin().read_line(&mut input).map_err(NotesError::Io)?;

            let input = input.trim().to_lowercase();
            if input != "y" && input != "yes" {
                println!("Deletion cancelled.");
                return Ok(());
            }
        }

        self.session.dispatch(Action::Delete(id))?;
        println!(
            "Note '{}' ({}) has been permanently deleted.",
            note.title, note.id
        );
        Ok(())
    }

    fn view_note(&self, id: &str, json: bool) -> Result<()> {
        let note = self.find_note(id)?;
        if json {
            println!("{}", serde_json::to_string_pretty(&note)?);
        } else {
            self.print_card(&note, true);
        }
        Ok(())
    }

    /// Applies the filter gestures in order and renders the final view
    fn list_notes(&mut self, actions: Vec<Action>, json: bool) -> Result<()> {
        let mut projection = self.session.view();
        for action in actions {
            projection = self.session.dispatch(action)?.projection;
        }

        if json {
            let output = serde_json::json!({
                "filters": self.session.filters(),
                "visible": projection.visible,
                "stats": projection.stats,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            self.display_projection(&projection);
        }
        Ok(())
    }

    fn list_tags(&self, json: bool) -> Result<()> {
        let stats = self.session.view().stats;
        if json {
            println!("{}", serde_json::to_string_pretty(&stats.tag_counts)?);
            return Ok(());
        }

        if stats.tag_counts.is_empty() {
            println!("No tags yet.");
            return Ok(());
        }
        for (tag, count) in &stats.tag_counts {
            println!("{} ({})", style(tag).cyan(), count);
        }
        Ok(())
    }

    fn show_stats(&self) {
        let Stats {
            total_count,
            completed_count,
            tag_counts,
            ..
        } = self.session.view().stats;
        println!("Total:     {}", total_count);
        println!("Completed: {}", completed_count);
        println!("Open:      {}", total_count - completed_count);
        println!("Tags:      {}", tag_counts.len());
    }

    fn find_note(&self, id: &str) -> Result<Note> {
        self.session
            .store()
            .get(id)
            .cloned()
            .ok_or_else(|| NotesError::NoteNotFound { id: id.to_string() })
    }

    fn display_projection(&self, projection: &Projection) {
        if projection.visible.is_empty() {
            println!("No notes to show. Create one with `swiftnotes new`.");
        } else {
            let term_width = terminal_size::terminal_size()
                .map(|(w, _)| w.0 as usize)
                .unwrap_or(80);

            for (i, note) in projection.visible.iter().enumerate() {
                if i > 0 {
                    println!("{}", "-".repeat(term_width.min(50)));
                }
                self.print_card(note, false);
            }
        }

        println!(
            "\n{} shown | {} completed",
            projection.stats.visible_count, projection.stats.completed_count
        );
    }

    fn print_card(&self, note: &Note, full_body: bool) {
        let marker = if note.completed { "[x]" } else { "[ ]" };
        let title = if note.completed {
            style(&note.title).dim()
        } else {
            style(&note.title).bold()
        };
        println!("{} {}  {}", marker, title, style(&note.id).dim());

        let body = if full_body {
            note.body.clone()
        } else {
            content_preview(&note.body, PREVIEW_CHARS)
        };
        if !body.is_empty() {
            println!("{}", body);
        }

        println!("{}", style(meta_line(note)).dim());

        if !note.tags.is_empty() {
            let tags = note
                .tags
                .iter()
                .map(|tag| format!("#{}", tag))
                .collect::<Vec<_>>()
                .join(" ");
            println!("{}", style(tags).cyan());
        }
    }

    /// Returns the body to store: inline text wins, then a file, then the editor.
    fn resolve_body(
        &self,
        title: Option<&str>,
        body: Option<String>,
        file: Option<PathBuf>,
        open_editor: bool,
        existing: &str,
    ) -> Result<Option<String>> {
        if body.is_some() && file.is_some() {
            return Err(NotesError::ApplicationError {
                message: "Cannot specify both --body and --file options".to_string(),
            });
        }
        if body.is_some() && open_editor {
            return Err(NotesError::ApplicationError {
                message: "Cannot specify both --body and --edit options".to_string(),
            });
        }

        match (body, file) {
            (Some(b), _) => Ok(Some(b)),
            (_, Some(file_path)) => {
                if !file_path.exists() {
                    return Err(NotesError::FileNotFound {
                        file_path: file_path.display().to_string(),
                    });
                }
                Ok(Some(read_to_string(file_path)?))
            }
            (None, None) if open_editor => self
                .open_editor_for_body(title.unwrap_or_default(), existing)
                .map(Some),
            (None, None) => Ok(None),
        }
    }

    fn open_editor_for_body(&self, title: &str, existing: &str) -> Result<String> {
        let temp_file = Builder::new().suffix(".md").tempfile()?;
        let temp_path = temp_file.path().to_path_buf();

        let editor_cmd = self.config.get_editor_command();
        self.write_editor_template(&temp_path, title, existing)?;

        info!("Opening editor to write the note body. Save and exit when done...");
        self.launch_editor(&editor_cmd, &temp_path)?;

        let content = read_to_string(&temp_path)?;
        Ok(strip_editor_comments(&content))
    }

    fn write_editor_template(&self, path: &Path, title: &str, existing: &str) -> Result<()> {
        let mut file = OpenOptions::new().write(true).truncate(true).open(path)?;

        writeln!(file, "<!-- Body of note: {} -->", title)?;
        writeln!(file, "<!-- Lines like this one are ignored. Save and exit when done. -->")?;
        if !existing.is_empty() {
            writeln!(file, "{}", existing)?;
        }

        Ok(())
    }

    fn launch_editor(&self, editor_cmd: &str, file_path: &Path) -> Result<()> {
        let args = split(editor_cmd).map_err(|e| NotesError::EditorError {
            message: format!("Failed to parse editor command: {}", e),
        })?;

        let Some((program, rest)) = args.split_first() else {
            return Err(NotesError::EditorError {
                message: "Empty editor command".to_string(),
            });
        };

        let status = Command::new(program).args(rest).arg(file_path).status()?;

        if !status.success() {
            return Err(NotesError::EditorError {
                message: "Editor exited with non-zero status".to_string(),
            });
        }

        Ok(())
    }
}

/// `Priority • Due: <date> • Updated: <local time>`, skipping absent parts.
fn meta_line(note: &Note) -> String {
    let mut parts = vec![note.priority.label()];
    if let Some(due) = note.due {
        parts.push(format!("Due: {}", due.format("%Y-%m-%d")));
    }
    parts.push(format!(
        "Updated: {}",
        note.updated_at.with_timezone(&Local).format("%Y-%m-%d %H:%M")
    ));
    parts.join(" • ")
}

/// Drops whole-line `<!-- ... -->` comments left by the editor template.
fn strip_editor_comments(content: &str) -> String {
    content
        .lines()
        .filter(|line| {
            let line = line.trim();
            !(line.starts_with("<!--") && line.ends_with("-->"))
        })
        .collect::<Vec<&str>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Priority;
    use chrono::{NaiveDate, Utc};
    use pretty_assertions::assert_eq;

    #[test]
    fn editor_comments_are_removed() {
        let content = "<!-- Body of note: x -->\n  <!-- ignored -->\nline one\nline <!-- two -->\n";
        assert_eq!(strip_editor_comments(content), "line one\nline <!-- two -->");
    }

    #[test]
    fn meta_line_skips_missing_due() {
        let input = NoteInput::titled("x").with_priority(Priority::High);
        let mut note = Note::from_input("a".into(), &input, Priority::Low, Utc::now());
        let meta = meta_line(&note);
        assert!(meta.starts_with("High • Updated: "));

        note.due = NaiveDate::from_ymd_opt(2024, 3, 9);
        assert!(meta_line(&note).starts_with("High • Due: 2024-03-09 • Updated: "));
    }
}
