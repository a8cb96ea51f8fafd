//! Page chrome shared by every store page: store switcher, navigation and
//! the flash notice.

use storedash_core::{Notice, ResourceKind, Store};

/// Entry of the store switcher.
#[derive(Debug, Clone)]
pub struct StoreLink {
    pub name: String,
    pub href: String,
    pub current: bool,
}

/// Main navigation entry.
#[derive(Debug, Clone)]
pub struct NavLink {
    pub label: &'static str,
    pub href: String,
    pub active: bool,
}

/// Which navigation entry is highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Overview,
    Resource(ResourceKind),
    Settings,
}

/// Everything `base.html` needs.
#[derive(Debug, Clone)]
pub struct Layout {
    pub owner: String,
    pub store_id: String,
    pub store_name: String,
    pub stores: Vec<StoreLink>,
    pub nav: Vec<NavLink>,
    pub notice: Option<Notice>,
}

impl Layout {
    #[must_use]
    pub fn new(current: &Store, stores: &[Store], section: Section, notice: Option<Notice>) -> Self {
        let base = format!("/{}", current.id);

        let mut nav = vec![NavLink {
            label: "Overview",
            href: base.clone(),
            active: section == Section::Overview,
        }];
        nav.extend(ResourceKind::ALL.into_iter().map(|kind| NavLink {
            label: kind.title(),
            href: format!("{base}/{}", kind.path()),
            active: section == Section::Resource(kind),
        }));
        nav.push(NavLink {
            label: "Settings",
            href: format!("{base}/settings"),
            active: section == Section::Settings,
        });

        let stores = stores
            .iter()
            .map(|store| StoreLink {
                name: store.name.clone(),
                href: format!("/{}", store.id),
                current: store.id == current.id,
            })
            .collect();

        Self {
            owner: current.owner_id.to_string(),
            store_id: current.id.to_string(),
            store_name: current.name.clone(),
            stores,
            nav,
            notice,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use storedash_core::{OwnerId, StoreId};

    use super::*;

    fn store(name: &str) -> Store {
        Store {
            id: StoreId::generate(),
            owner_id: OwnerId::parse("user_1").expect("owner"),
            name: name.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_nav_marks_active_section() {
        let current = store("Main");
        let layout = Layout::new(
            &current,
            std::slice::from_ref(&current),
            Section::Resource(ResourceKind::Sizes),
            None,
        );

        let active: Vec<_> = layout.nav.iter().filter(|n| n.active).map(|n| n.label).collect();
        assert_eq!(active, ["Sizes"]);
        assert_eq!(layout.nav.len(), ResourceKind::ALL.len() + 2);
        assert_eq!(layout.nav[0].href, format!("/{}", current.id));
    }

    #[test]
    fn test_store_switcher_marks_current() {
        let current = store("Main");
        let other = store("Outlet");
        let layout = Layout::new(
            &current,
            &[other, current.clone()],
            Section::Settings,
            Some(Notice::Success("Store updated.".to_string())),
        );

        let current_names: Vec<_> = layout
            .stores
            .iter()
            .filter(|s| s.current)
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(current_names, ["Main"]);
        assert_eq!(layout.store_name, "Main");
        assert_eq!(layout.owner, "user_1");
    }
}
