//! Blocking dialogs supplied by whatever hosts the booking controller.

pub trait HostDialogs: Send + Sync {
    /// Asks the user to approve a destructive action. Blocks until answered.
    fn confirm(&self, message: &str) -> bool;
    /// Shows a failure notice. Blocks until dismissed.
    fn alert(&self, message: &str);
}

