//! Dashboard search.
//!
//! One query hits `GET /search`, which answers with notes, files, links and
//! credentials at once. Results are grouped by category in an overlay;
//! picking a category closes the overlay and opens that list.

use std::sync::Arc;

use serde::Serialize;

use crate::context::CurrentUser;
use crate::error::Result;
use crate::gateway::Gateway;
use crate::models::SearchResults;
use crate::navigation::{Navigator, Route};
use crate::report::{Notice, Reporter};
use crate::screens::{owned_by, Resource};

/// Result groups, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Docs,
    Links,
    Creds,
    Notes,
}

impl Category {
    pub const ALL: [Category; 4] = [Category::Docs, Category::Links, Category::Creds, Category::Notes];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Docs => "Files",
            Category::Links => "Links",
            Category::Creds => "Credentials",
            Category::Notes => "Notes",
        }
    }

    pub fn route(&self) -> Route {
        match self {
            Category::Docs => Route::Files,
            Category::Links => Route::Links,
            Category::Creds => Route::Credentials,
            Category::Notes => Route::Notes,
        }
    }
}

/// One row of the results overlay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultCard {
    pub category: Category,
    pub id: String,
    pub title: String,
    pub subtitle: String,
}

pub struct Dashboard {
    gateway: Arc<dyn Gateway>,
    current: CurrentUser,
    reporter: Arc<dyn Reporter>,
    navigator: Arc<dyn Navigator>,
    results: SearchResults,
    overlay: bool,
}

impl Dashboard {
    pub fn new(
        gateway: Arc<dyn Gateway>,
        current: CurrentUser,
        reporter: Arc<dyn Reporter>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            gateway,
            current,
            reporter,
            navigator,
            results: SearchResults::default(),
            overlay: false,
        }
    }

    pub fn results(&self) -> &SearchResults {
        &self.results
    }

    pub fn overlay_visible(&self) -> bool {
        self.overlay
    }

    fn clear(&mut self) {
        self.results = SearchResults::default();
        self.overlay = false;
    }

    /// Run a search. A blank query clears the results without a request.
    pub async fn submit(&mut self, query: &str) -> Result<()> {
        if query.trim().is_empty() {
            self.clear();
            return Ok(());
        }

        match self.fetch(query).await {
            Ok(results) => {
                tracing::debug!(total = results.total(), "search complete");
                self.results = results;
                self.overlay = true;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "search failed");
                self.clear();
                self.reporter
                    .report(Notice::error(e.server_message().unwrap_or("Search failed")));
                Err(e)
            }
        }
    }

    async fn fetch(&self, query: &str) -> Result<SearchResults> {
        let owner_id = self.current.owner_id().await?;
        let results = self.gateway.search(query, &owner_id).await?;
        // The backend already scopes by userId; filter again on our side.
        Ok(SearchResults {
            notes: owned_by(results.notes, &owner_id),
            docs: owned_by(results.docs, &owner_id),
            links: owned_by(results.links, &owner_id),
            creds: owned_by(results.creds, &owner_id),
        })
    }

    /// Close the overlay and open the list for `category`.
    pub fn select(&mut self, category: Category) {
        self.overlay = false;
        self.navigator.navigate(category.route());
    }

    /// Overlay rows for the current results, grouped by category.
    pub fn cards(&self) -> Vec<ResultCard> {
        let mut cards = Vec::with_capacity(self.results.total());
        for file in &self.results.docs {
            cards.push(ResultCard {
                category: Category::Docs,
                id: file.id.clone(),
                title: file.title.clone(),
                subtitle: file.description.clone().unwrap_or_default(),
            });
        }
        for link in &self.results.links {
            cards.push(ResultCard {
                category: Category::Links,
                id: link.id.clone(),
                title: link.title().to_string(),
                subtitle: link.url.clone(),
            });
        }
        for cred in &self.results.creds {
            cards.push(ResultCard {
                category: Category::Creds,
                id: cred.id.clone(),
                title: cred.username.clone(),
                subtitle: cred.site.clone(),
            });
        }
        for note in &self.results.notes {
            cards.push(ResultCard {
                category: Category::Notes,
                id: note.id.clone(),
                title: note.title.clone(),
                subtitle: note.note.clone(),
            });
        }
        cards
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories_route_to_lists() {
        let routes: Vec<Route> = Category::ALL.iter().map(Category::route).collect();
        assert_eq!(
            routes,
            vec![Route::Files, Route::Links, Route::Credentials, Route::Notes]
        );
        assert_eq!(Category::Creds.label(), "Credentials");
    }
}
