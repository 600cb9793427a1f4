//! User-facing notices raised by palette operations.
//!
//! The shell decides how to present them (toast, status line, log); the core
//! only reports what happened through [`Notifier`].

use std::fmt;

/// Something the user should be told about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// A new set was created.
    SetCreated { name: String },
    /// A set was renamed.
    SetRenamed { name: String },
    /// A set was deleted.
    SetDeleted,
    /// Deleting was refused because only one set remains.
    CannotDeleteLastSet,
    /// An export was requested with no segments to draw.
    NothingToExport,
    /// An export artifact was produced.
    ExportSucceeded { file_name: String },
}

impl Notice {
    /// Short heading, if the notice carries one.
    pub fn title(&self) -> Option<&'static str> {
        match self {
            Notice::CannotDeleteLastSet => Some("Cannot delete set"),
            Notice::NothingToExport => Some("No segments to export"),
            Notice::ExportSucceeded { .. } => Some("Export successful"),
            _ => None,
        }
    }

    /// Whether the notice reports a refused operation.
    pub fn is_destructive(&self) -> bool {
        matches!(self, Notice::CannotDeleteLastSet | Notice::NothingToExport)
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::SetCreated { name } => write!(f, "Set \"{}\" created successfully.", name),
            Notice::SetRenamed { name } => write!(f, "Set renamed to \"{}\".", name),
            Notice::SetDeleted => write!(f, "Set deleted successfully."),
            Notice::CannotDeleteLastSet => {
                write!(f, "You must have at least one set of segments.")
            }
            Notice::NothingToExport => {
                write!(f, "Please create or select segments to export.")
            }
            Notice::ExportSucceeded { file_name } => {
                write!(f, "Your color segments have been exported as {}.", file_name)
            }
        }
    }
}

/// Receiver for notices.
pub trait Notifier {
    fn notify(&self, notice: &Notice);
}

/// Notifier that forwards everything to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notice: &Notice) {
        if notice.is_destructive() {
            log::warn!("{}", notice);
        } else {
            log::info!("{}", notice);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let created = Notice::SetCreated { name: "Warm".to_string() };
        assert_eq!(created.to_string(), "Set \"Warm\" created successfully.");
        assert_eq!(created.title(), None);
        assert_eq!(Notice::CannotDeleteLastSet.title(), Some("Cannot delete set"));
        assert!(Notice::NothingToExport.is_destructive());
        assert!(!Notice::SetDeleted.is_destructive());
    }
}
