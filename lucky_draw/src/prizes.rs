use log::{debug, info};
use snafu::{ensure, OptionExt};

use crate::config::*;

/// Finds the prize `id` in the catalog.
///
/// A missing id or a prize that was deleted after being selected both give
/// `None`: the draw is then done without a prize.
pub fn resolve_selected<'a>(id: Option<&str>, catalog: &'a [Prize]) -> Option<&'a Prize> {
    let id = id?;
    catalog.iter().find(|p| p.id == id)
}

/// The prizes configured for a session, and the one currently selected.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct PrizeCatalog {
    prizes: Vec<Prize>,
    selected: Option<PrizeId>,
    generated: u64,
}

impl PrizeCatalog {
    pub fn new() -> PrizeCatalog {
        PrizeCatalog::default()
    }

    /// Adds a prize with a generated identifier.
    pub fn add(&mut self, name: &str, image_url: Option<String>) -> Prize {
        let id = self.fresh_id();
        let prize = Prize {
            id,
            name: name.to_string(),
            image_url,
        };
        info!("add: prize {} ({})", prize.id, prize.name);
        self.prizes.push(prize.clone());
        prize
    }

    /// Adds a prize that already carries its identifier.
    pub fn insert(&mut self, prize: Prize) -> Result<(), DrawError> {
        ensure!(
            self.get(&prize.id).is_none(),
            DuplicatePrizeIdSnafu {
                prize_id: prize.id.clone()
            }
        );
        info!("insert: prize {} ({})", prize.id, prize.name);
        self.prizes.push(prize);
        Ok(())
    }

    /// Removes a prize. If it was the selected one, the selection is cleared.
    pub fn delete(&mut self, prize_id: &str) -> Result<Prize, DrawError> {
        let pos = self
            .prizes
            .iter()
            .position(|p| p.id == prize_id)
            .context(PrizeNotFoundSnafu { prize_id })?;
        let removed = self.prizes.remove(pos);
        if self.selected.as_deref() == Some(prize_id) {
            debug!("delete: clearing the selection of {}", prize_id);
            self.selected = None;
        }
        info!("delete: prize {} ({})", removed.id, removed.name);
        Ok(removed)
    }

    /// Selects a prize of the catalog, or clears the selection with `None`.
    pub fn select(&mut self, prize_id: Option<&str>) -> Result<(), DrawError> {
        if let Some(id) = prize_id {
            ensure!(self.get(id).is_some(), PrizeNotFoundSnafu { prize_id: id });
        }
        self.selected = prize_id.map(|s| s.to_string());
        Ok(())
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn selected(&self) -> Option<&Prize> {
        resolve_selected(self.selected_id(), &self.prizes)
    }

    pub fn get(&self, prize_id: &str) -> Option<&Prize> {
        self.prizes.iter().find(|p| p.id == prize_id)
    }

    pub fn prizes(&self) -> &[Prize] {
        &self.prizes
    }

    pub fn is_empty(&self) -> bool {
        self.prizes.is_empty()
    }

    fn fresh_id(&mut self) -> PrizeId {
        loop {
            self.generated += 1;
            let id = format!("p{}", self.generated);
            if self.get(&id).is_none() {
                return id;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_skip_explicit_ones() {
        let mut catalog = PrizeCatalog::new();
        catalog
            .insert(Prize {
                id: "p1".to_string(),
                name: "Gold".to_string(),
                image_url: None,
            })
            .unwrap();
        let silver = catalog.add("Silver", None);
        assert_eq!(silver.id, "p2");
        assert_eq!(catalog.prizes().len(), 2);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut catalog = PrizeCatalog::new();
        let gold = catalog.add("Gold", None);
        let err = catalog.insert(gold.clone()).unwrap_err();
        assert_eq!(err, DrawError::DuplicatePrizeId { prize_id: gold.id });
    }

    #[test]
    fn deleting_the_selected_prize_clears_the_selection() {
        let mut catalog = PrizeCatalog::new();
        let gold = catalog.add("Gold", Some("gold.png".to_string()));
        let silver = catalog.add("Silver", None);
        catalog.select(Some(gold.id.as_str())).unwrap();
        assert_eq!(catalog.selected(), Some(&gold));

        catalog.delete(&silver.id).unwrap();
        assert_eq!(catalog.selected_id(), Some(gold.id.as_str()));

        catalog.delete(&gold.id).unwrap();
        assert_eq!(catalog.selected_id(), None);
        assert_eq!(
            resolve_selected(Some(gold.id.as_str()), catalog.prizes()),
            None
        );
    }

    #[test]
    fn selecting_an_unknown_prize_fails() {
        let mut catalog = PrizeCatalog::new();
        let err = catalog.select(Some("p9")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(catalog.selected_id(), None);
    }

    #[test]
    fn resolve_selected_is_stable() {
        let mut catalog = PrizeCatalog::new();
        let gold = catalog.add("Gold", None);
        let a = resolve_selected(Some("p1"), catalog.prizes()).cloned();
        let b = resolve_selected(Some("p1"), catalog.prizes()).cloned();
        assert_eq!(a, Some(gold));
        assert_eq!(a, b);
        assert_eq!(resolve_selected(None, catalog.prizes()), None);
    }
}
