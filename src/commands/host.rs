//! Terminal implementation of the launcher host

use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, Color, ContentArrangement, Table};
use owo_colors::OwoColorize;
use std::io::{self, ErrorKind, Write};
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::debug;

use code_workspaces::config::EditorApp;
use code_workspaces::presentation::{Host, ListView, Toast, ToastStyle};

/// Renders tables on stdout and hands actions to the platform opener
pub struct TerminalHost {
    /// Show workspace IDs in the list
    pub with_id: bool,
    pub favorite_color: Color,
}

impl TerminalHost {
    pub fn new(favorite_color: Color) -> Self {
        Self {
            with_id: false,
            favorite_color,
        }
    }
}

impl Host for TerminalHost {
    fn render_list(&mut self, view: &ListView) -> io::Result<()> {
        let mut out = io::stdout().lock();
        let mut shown = 0;

        for section in view.sections.iter().filter(|s| !s.items.is_empty()) {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL_CONDENSED)
                .set_content_arrangement(ContentArrangement::Dynamic);

            let mut header = vec![];
            if self.with_id {
                header.push(Cell::new("ID"));
            }
            header.push(Cell::new(""));
            header.push(Cell::new("Workspace"));
            header.push(Cell::new("Folder"));
            table.set_header(header);

            for item in &section.items {
                let mut row = vec![];
                if self.with_id {
                    row.push(Cell::new(&item.id));
                }
                row.push(match &item.accessory {
                    Some(icon) => Cell::new(icon).fg(self.favorite_color),
                    None => Cell::new(""),
                });
                row.push(Cell::new(&item.title));
                row.push(Cell::new(&item.subtitle));
                table.add_row(row);
            }

            writeln!(out, "{}", section.title.bold())?;
            writeln!(out, "{}\n", table)?;
            shown += section.items.len();
        }

        if shown == 0 {
            writeln!(out, "No workspaces found.")?;
        } else {
            writeln!(out, "{} workspaces", shown)?;
        }
        Ok(())
    }

    fn open_with(&mut self, app: &EditorApp, target: &Path) -> io::Result<()> {
        debug!("Opening {} with {}", target.display(), app.name);

        #[cfg(target_os = "macos")]
        {
            run(Command::new("open").arg("-a").arg(&app.name).arg(target))
        }

        #[cfg(not(target_os = "macos"))]
        {
            run(Command::new(&app.command).arg(target))
        }
    }

    fn open_path(&mut self, path: &Path) -> io::Result<()> {
        run(Command::new(opener()).arg(path))
    }

    fn reveal(&mut self, path: &Path) -> io::Result<()> {
        #[cfg(target_os = "macos")]
        {
            run(Command::new("open").arg("-R").arg(path))
        }

        #[cfg(windows)]
        {
            let mut select = std::ffi::OsString::from("/select,");
            select.push(path);
            run(Command::new("explorer").arg(select))
        }

        // xdg-open has no select, open the containing directory
        #[cfg(not(any(target_os = "macos", windows)))]
        {
            let dir = path.parent().unwrap_or(path);
            run(Command::new(opener()).arg(dir))
        }
    }

    fn copy_to_clipboard(&mut self, text: &str) -> io::Result<()> {
        for (program, args) in CLIPBOARD_COMMANDS {
            match pipe_to(program, args, text) {
                Ok(()) => {
                    println!("{} {}", "Copied:".green(), text);
                    return Ok(());
                }
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    debug!("Clipboard tool {} not available", program);
                }
                Err(e) => return Err(e),
            }
        }

        // No clipboard tool, leave it on stdout for piping
        println!("{}", text);
        Ok(())
    }

    fn notify(&mut self, toast: &Toast) {
        match toast.style {
            ToastStyle::Success => println!("{} {}", toast.title.green(), toast.message),
            ToastStyle::Failure => eprintln!("{} {}", toast.title.red(), toast.message),
        }
    }

    fn reset_view(&mut self) {
        // A terminal has no view state to reset
        debug!("View reset");
    }
}

/// Program that opens a path with its default handler
fn opener() -> &'static str {
    if cfg!(target_os = "macos") {
        "open"
    } else if cfg!(windows) {
        "explorer"
    } else {
        "xdg-open"
    }
}

/// Clipboard tools tried in order
#[cfg(target_os = "macos")]
const CLIPBOARD_COMMANDS: &[(&str, &[&str])] = &[("pbcopy", &[])];

#[cfg(windows)]
const CLIPBOARD_COMMANDS: &[(&str, &[&str])] = &[("clip", &[])];

#[cfg(not(any(target_os = "macos", windows)))]
const CLIPBOARD_COMMANDS: &[(&str, &[&str])] =
    &[("wl-copy", &[]), ("xclip", &["-selection", "clipboard"])];

/// Run a command to completion, failing on a non-zero exit
fn run(command: &mut Command) -> io::Result<()> {
    let status = command.status()?;
    if status.success() {
        Ok(())
    } else {
        Err(io::Error::other(format!(
            "{:?} exited with {}",
            command.get_program(),
            status
        )))
    }
}

fn pipe_to(program: &str, args: &[&str], text: &str) -> io::Result<()> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .spawn()?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(text.as_bytes())?;
    }

    let status = child.wait()?;
    if status.success() {
        Ok(())
    } else {
        Err(io::Error::other(format!("{} exited with {}", program, status)))
    }
}
