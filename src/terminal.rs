//! # Terminal Front End
//!
//! A line-oriented stand-in for the mobile screens. Operator commands are parsed into
//! [`WorkflowEvent`]s and every published [`WorkflowView`] is rendered as plain text.
//! Scans are typed in with `read <text>`, standing in for the camera's decoded output.

use std::fmt::Write;

use crate::model::{PermissionState, UserId};
use crate::workflow::{Screen, WorkflowEvent, WorkflowView};

pub const HELP: &str = "\
Commands:
  pick <id>      highlight a user        login        confirm the highlighted user
  scan           open the scanner        close        close the scanner
  read <text>    feed decoded scan text
  -  +           change the quantity     qty <n>      type a quantity (empty sets 0)
  save           ask to commit           cancel       discard the edit
  yes  no        answer \"are you sure?\"  ok           dismiss the message
  help  quit";

/// A parsed line of operator input.
#[derive(Debug)]
pub enum Command {
    Event(WorkflowEvent),
    Help,
    Quit,
}

/// Parses one input line. Returns `None` for blank or unrecognised input.
pub fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let event = match word.to_ascii_lowercase().as_str() {
        "help" | "?" => return Some(Command::Help),
        "quit" | "exit" => return Some(Command::Quit),
        "pick" if rest.is_empty() => WorkflowEvent::HighlightUser(None),
        "pick" => WorkflowEvent::HighlightUser(Some(UserId(rest.parse().ok()?))),
        "login" => WorkflowEvent::ConfirmUser,
        "scan" => WorkflowEvent::OpenScanner,
        "close" => WorkflowEvent::CloseScanner,
        "read" if !rest.is_empty() => WorkflowEvent::Scanned(rest.to_string()),
        "-" => WorkflowEvent::DecrementQuantity,
        "+" => WorkflowEvent::IncrementQuantity,
        "qty" => WorkflowEvent::EnterQuantity(rest.to_string()),
        "save" => WorkflowEvent::RequestConfirm,
        "cancel" => WorkflowEvent::CancelReview,
        "yes" => WorkflowEvent::Commit,
        "no" => WorkflowEvent::DeclineCommit,
        "ok" => WorkflowEvent::Acknowledge,
        _ => return None,
    };
    Some(Command::Event(event))
}

/// Renders a view as the text the operator sees.
pub fn render(view: &WorkflowView) -> String {
    let mut out = String::new();
    render_screen(&mut out, &view.screen, view.permission);

    if let Some(operator) = view.screen.operator() {
        if !matches!(view.screen, Screen::ScanReady { .. }) {
            let _ = write!(out, "\n(signed in as {})", operator.username);
        }
    }

    if let Some(notice) = &view.notice {
        let _ = write!(out, "\n[!] {notice}  (ok to dismiss)");
        if view.queued_notices > 0 {
            let _ = write!(out, " +{} more", view.queued_notices);
        }
    }
    out
}

fn render_screen(out: &mut String, screen: &Screen, permission: PermissionState) {
    // Writing to a String cannot fail.
    let _ = match screen {
        Screen::Loading => write!(out, "Loading..."),
        Screen::Error { message } => write!(out, "{message}"),
        Screen::UserSelect { users, highlighted } => {
            let _ = writeln!(out, "Choose a user:");
            for user in users {
                let marker = if Some(user.id) == *highlighted { ">" } else { " " };
                let _ = writeln!(out, " {marker} {:>4}  {}", user.id.0, user.username);
            }
            write!(out, "pick <id>, then login")
        }
        Screen::ScanReady { operator } if permission.is_granted() => {
            write!(out, "Hello, {}!\nscan to open the scanner", operator.username)
        }
        Screen::ScanReady { operator } => write!(
            out,
            "Hello, {}!\nCamera access is {permission}, the scanner cannot be opened",
            operator.username
        ),
        Screen::Scanning { scanned: false, .. } => {
            write!(out, "Scan a QR code (read <text>), or close")
        }
        Screen::Scanning { scanned: true, .. } => write!(out, "Looking up the scanned code..."),
        Screen::Reviewing { edit, .. } => {
            let product = &edit.target.record;
            let _ = writeln!(out, "Update product");
            let _ = writeln!(out, "  Name:             {}", product.name);
            if let Some(description) = &product.description {
                let _ = writeln!(out, "  Description:      {description}");
            }
            if let Some(price) = &product.price {
                let _ = writeln!(out, "  Price:            {price}");
            }
            let _ = writeln!(out, "  Current quantity: {}", product.stock_quantity);
            let _ = writeln!(out, "  New quantity:     {}", edit.draft_quantity);
            write!(out, "- / + / qty <n>, save or cancel")
        }
        Screen::Confirming {
            committing: true, ..
        } => write!(out, "Saving..."),
        Screen::Confirming { edit, .. } => write!(
            out,
            "ARE YOU SURE?\nNew quantity: {}\nyes or no",
            edit.draft_quantity
        ),
    };
}
