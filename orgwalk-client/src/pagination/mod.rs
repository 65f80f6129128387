//! Cursor-following pagination over search results.
//!
//! The service does not promise that an item appears on only one page, so
//! accumulation and de-duplication are separate steps.

use std::collections::HashSet;

use orgwalk_core::errors::{OrgWalkError, OrgWalkResult};
use orgwalk_core::models::{Entity, SearchPage};
use orgwalk_core::traits::IHttpSender;
use orgwalk_observability::events;

use crate::transport::HttpClient;

/// Items gathered across all pages of one result set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageCollection {
    pub items: Vec<Entity>,
    /// Pages consumed, including the first.
    pub pages: usize,
    /// Items dropped because their id was already collected.
    pub duplicates: usize,
}

/// Follows `next` links until the service stops supplying one.
pub struct Paginator<'a, S> {
    http: &'a HttpClient<S>,
}

impl<'a, S: IHttpSender> Paginator<'a, S> {
    pub fn new(http: &'a HttpClient<S>) -> Self {
        Self { http }
    }

    /// Accumulate items from `first` and every following page, in arrival order.
    ///
    /// No de-duplication. A `next` link that was already visited is a protocol
    /// error rather than an endless loop.
    pub async fn collect(&self, first: SearchPage) -> OrgWalkResult<PageCollection> {
        let mut visited: HashSet<String> = HashSet::new();
        if let Some(self_link) = first.links.self_link.as_deref() {
            visited.insert(self_link.to_string());
        }

        let mut out = PageCollection::default();
        let mut page = first;
        loop {
            out.pages += 1;
            let next = page.next_link().map(str::to_string);
            out.items.append(&mut page.items);

            let Some(next) = next else { break };
            if !visited.insert(next.clone()) {
                return Err(OrgWalkError::Protocol {
                    reason: format!("pagination cycle: next link {next} was already visited"),
                });
            }
            page = self.fetch_page(&next).await?;
        }
        Ok(out)
    }

    /// Like [`collect`](Self::collect), then drop repeated ids (first occurrence wins).
    pub async fn collect_unique(&self, first: SearchPage) -> OrgWalkResult<PageCollection> {
        let mut collected = self.collect(first).await?;
        let (items, duplicates) = dedup_by_id(std::mem::take(&mut collected.items));
        collected.items = items;
        collected.duplicates = duplicates;
        events::pagination_finished(collected.pages, collected.items.len(), duplicates);
        Ok(collected)
    }

    /// Fetch one page by its opaque reference. 204 reads as an empty last page.
    pub async fn fetch_page(&self, link: &str) -> OrgWalkResult<SearchPage> {
        Ok(self.http.get_json::<SearchPage>(link).await?.unwrap_or_default())
    }
}

/// Keep the first entity for each id, preserving order. Returns the number dropped.
pub fn dedup_by_id(items: Vec<Entity>) -> (Vec<Entity>, usize) {
    let mut seen = HashSet::with_capacity(items.len());
    let total = items.len();
    let unique: Vec<Entity> = items
        .into_iter()
        .filter(|e| seen.insert(e.id.clone()))
        .collect();
    let dropped = total - unique.len();
    (unique, dropped)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(id: &str, name: &str) -> Entity {
        Entity::new(id, name)
    }

    #[test]
    fn dedup_keeps_first_occurrence() {
        let (items, dropped) = dedup_by_id(vec![
            named("a", "first"),
            named("b", "b"),
            named("a", "second"),
            named("c", "c"),
            named("b", "again"),
        ]);
        assert_eq!(dropped, 2);
        let ids: Vec<_> = items.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(items[0].name, "first");
    }

    #[test]
    fn dedup_of_empty_is_empty() {
        let (items, dropped) = dedup_by_id(Vec::new());
        assert!(items.is_empty());
        assert_eq!(dropped, 0);
    }
}
