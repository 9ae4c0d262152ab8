use std::{collections::HashSet, sync::Arc};

mod disruptions;
mod routes;
mod shapes;

/// Insertion-ordered list that silently ignores values it already holds.
#[derive(Debug, Default)]
pub(crate) struct UniqueList {
    items: Vec<Arc<str>>,
    seen: HashSet<Arc<str>>,
}

impl UniqueList {
    pub(crate) fn push(&mut self, value: String) {
        if self.seen.contains(value.as_str()) {
            return;
        }
        let value: Arc<str> = value.into();
        self.seen.insert(value.clone());
        self.items.push(value);
    }
}

impl From<UniqueList> for Box<[Arc<str>]> {
    fn from(value: UniqueList) -> Self {
        value.items.into()
    }
}

#[test]
fn unique_list_keeps_first_seen_order() {
    let mut list = UniqueList::default();
    ["b", "a", "b", "c", "a"]
        .into_iter()
        .for_each(|value| list.push(value.to_string()));
    let items: Box<[Arc<str>]> = list.into();
    let items: Vec<&str> = items.iter().map(|item| &**item).collect();
    assert_eq!(items, vec!["b", "a", "c"]);
}
