//! Side-bar tab registration.

use nebula_config::SideBarItem;
use nebula_ui::SideBar;
use tracing::{debug, warn};

/// Adds configured tabs to the side bar and remembers them for removal.
#[derive(Debug, Default)]
pub struct SideBarRegistrar {
    registered: Vec<String>,
}

impl SideBarRegistrar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Names of the tabs currently registered, in registration order.
    pub fn registered(&self) -> &[String] {
        &self.registered
    }

    /// Add every item as a tab, in order.
    pub fn register_all<S: SideBar + ?Sized>(&mut self, items: &[SideBarItem], sidebar: &mut S) {
        for item in items {
            sidebar.add_tab(&item.name, &item.icon, &item.html);
            debug!("Added side-bar tab '{}' ({})", item.name, item.icon);
            self.registered.push(item.name.clone());
        }
    }

    /// Remove every tab this registrar added, newest first.
    pub fn unregister_all<S: SideBar + ?Sized>(&mut self, sidebar: &mut S) {
        while let Some(name) = self.registered.pop() {
            if !sidebar.remove_tab(&name) {
                warn!("Side-bar tab '{name}' was already gone");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nebula_ui::HeadlessGui;

    fn tab(name: &str) -> SideBarItem {
        SideBarItem {
            name: name.to_string(),
            icon: "menu_book".to_string(),
            html: format!("<iframe src='{name}.html'></iframe>"),
        }
    }

    #[test]
    fn test_register_in_order() {
        let mut gui = HeadlessGui::new();
        let mut registrar = SideBarRegistrar::new();
        registrar.register_all(&[tab("Docs"), tab("Notes")], &mut gui);

        let names: Vec<&str> = gui.tabs().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["Docs", "Notes"]);
        assert_eq!(gui.tabs()[0].html, "<iframe src='Docs.html'></iframe>");
        assert_eq!(registrar.registered(), ["Docs", "Notes"]);
    }

    #[test]
    fn test_unregister_removes_only_own_tabs() {
        let mut gui = HeadlessGui::new();
        gui.add_tab("Host", "home", "<p>host</p>");
        let mut registrar = SideBarRegistrar::new();
        registrar.register_all(&[tab("Docs")], &mut gui);

        registrar.unregister_all(&mut gui);
        assert_eq!(gui.tabs().len(), 1);
        assert_eq!(gui.tabs()[0].name, "Host");
        assert!(registrar.registered().is_empty());

        // Second call is a no-op.
        registrar.unregister_all(&mut gui);
        assert_eq!(gui.tabs().len(), 1);
    }

    #[test]
    fn test_empty_list_adds_nothing() {
        let mut gui = HeadlessGui::new();
        let mut registrar = SideBarRegistrar::new();
        registrar.register_all(&[], &mut gui);
        assert!(gui.tabs().is_empty());
    }
}
