//! Side-bar tab collaborator.

/// A list of tabs in the host's side panel.
///
/// Duplicate names are the implementation's business.
pub trait SideBar {
    /// Append a tab with a Material icon name and HTML body.
    fn add_tab(&mut self, name: &str, icon: &str, html: &str);

    /// Remove the first tab with the given name. Returns `false` if none matched.
    fn remove_tab(&mut self, name: &str) -> bool;
}
