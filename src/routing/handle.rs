//! Shared handle to the current route table.
//!
//! Readers take a snapshot (`Arc<RouteTable>`) and keep using it for as long
//! as they like; a reload publishes a whole new table. Tables themselves are
//! never mutated.

use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::routing::router::RouteTable;

#[derive(Debug)]
pub struct SharedRouteTable {
    current: ArcSwap<RouteTable>,
}

impl SharedRouteTable {
    pub fn new(table: RouteTable) -> Self {
        Self {
            current: ArcSwap::from_pointee(table),
        }
    }

    /// Snapshot of the table in effect right now.
    pub fn snapshot(&self) -> Arc<RouteTable> {
        self.current.load_full()
    }

    /// Publish a new table. Existing snapshots are unaffected.
    pub fn replace(&self, table: RouteTable) {
        let routes = table.len();
        self.current.store(Arc::new(table));
        tracing::info!(routes, "Route table replaced");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::method::Method;
    use crate::routing::parser::parse_declarations;
    use crate::routing::pattern::MatchOptions;

    fn compile(source: &str) -> RouteTable {
        RouteTable::compile(parse_declarations(source).unwrap(), MatchOptions::default()).unwrap()
    }

    #[test]
    fn test_replace_keeps_old_snapshots_intact() {
        let shared = SharedRouteTable::new(compile("get '/about', { _action: 'about' }"));
        let before = shared.snapshot();

        shared.replace(compile("get '/contact', { _action: 'contact' }"));
        let after = shared.snapshot();

        assert!(before.resolve(Method::Get, "/about").is_some());
        assert!(before.resolve(Method::Get, "/contact").is_none());
        assert!(after.resolve(Method::Get, "/contact").is_some());
        assert!(after.resolve(Method::Get, "/about").is_none());
    }
}
