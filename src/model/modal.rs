//! Modal stack for managing overlays
//!
//! Each edit dialog is shown or hidden on its own; nothing stops two dialog
//! families from being open at once. Only the top modal receives input.

use super::dialog::DialogKind;

/// Represents a modal overlay that can be displayed on top of the main UI
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    /// Record edit dialog
    Dialog(DialogKind),
    /// Blocking confirmation before following a delete link
    ConfirmDelete { path: String },
    /// Quit confirmation dialog
    QuitConfirm,
}

/// A stack of modal overlays
///
/// Modals are rendered from bottom to top, with only the top modal
/// receiving input events.
#[derive(Debug, Default)]
pub struct ModalStack {
    stack: Vec<Modal>,
}

impl ModalStack {
    /// Create a new empty modal stack
    pub fn new() -> Self {
        Self { stack: Vec::new() }
    }

    /// Push a modal onto the stack
    pub fn push(&mut self, modal: Modal) {
        self.stack.push(modal);
    }

    /// Show a modal, moving it to the top if it is already shown
    pub fn show(&mut self, modal: Modal) {
        self.stack.retain(|m| *m != modal);
        self.stack.push(modal);
    }

    /// Hide one modal wherever it sits; returns whether it was shown
    pub fn hide(&mut self, modal: &Modal) -> bool {
        let before = self.stack.len();
        self.stack.retain(|m| m != modal);
        before != self.stack.len()
    }

    /// Pop the top modal from the stack
    pub fn pop(&mut self) -> Option<Modal> {
        self.stack.pop()
    }

    /// Get a reference to the top modal without removing it
    pub fn top(&self) -> Option<&Modal> {
        self.stack.last()
    }

    pub fn contains(&self, modal: &Modal) -> bool {
        self.stack.contains(modal)
    }

    /// Modals from bottom to top
    pub fn iter(&self) -> impl Iterator<Item = &Modal> {
        self.stack.iter()
    }

    /// Check if the stack is empty
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modal_stack_push_pop() {
        let mut stack = ModalStack::new();
        assert!(stack.top().is_none());

        stack.push(Modal::QuitConfirm);
        stack.push(Modal::Dialog(DialogKind::Item));

        assert_eq!(stack.pop(), Some(Modal::Dialog(DialogKind::Item)));
        assert_eq!(stack.pop(), Some(Modal::QuitConfirm));
        assert!(stack.top().is_none());
    }

    #[test]
    fn test_show_moves_existing_to_top() {
        let mut stack = ModalStack::new();
        stack.show(Modal::Dialog(DialogKind::Item));
        stack.show(Modal::Dialog(DialogKind::Return));
        stack.show(Modal::Dialog(DialogKind::Item));

        let shown: Vec<_> = stack.iter().cloned().collect();
        assert_eq!(
            shown,
            vec![
                Modal::Dialog(DialogKind::Return),
                Modal::Dialog(DialogKind::Item)
            ]
        );
    }

    #[test]
    fn test_hide_removes_only_that_dialog() {
        let mut stack = ModalStack::new();
        stack.show(Modal::Dialog(DialogKind::Return));
        stack.show(Modal::Dialog(DialogKind::Replacement));

        assert!(stack.hide(&Modal::Dialog(DialogKind::Return)));
        assert!(!stack.hide(&Modal::Dialog(DialogKind::Return)));
        assert_eq!(stack.top(), Some(&Modal::Dialog(DialogKind::Replacement)));
    }
}
