//! The filter cascade controller.
//!
//! Stage changes are edge invalidations in a strict linear dependency chain
//! Date -> Station -> Recipe -> Lot. Each trigger clears every descendant
//! stage, bumps a generation counter and returns the next [`FetchPlan`];
//! the adapter issues the request and feeds the response back through the
//! matching `apply_*` method, which chains the next plan until the cascade
//! settles. A response arriving for a superseded generation is discarded,
//! so a faster second chain can never be overwritten by a slower first one.

use crate::stage::Stage;
use fyd_api::query::{
    TrendQuery, DATES_ENDPOINT, LOTS_ENDPOINT, MACHINES_ENDPOINT, RECIPES_ENDPOINT,
};
use log::debug;
use std::collections::BTreeSet;
use thiserror::Error;

/// Validation failures for the terminal dashboard query.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CascadeError {
    /// The terminal query requires both ends of the date range.
    #[error("select a date range before running the dashboard query")]
    MissingDateRange,
}

/// A network call for the adapter to issue, tagged with the generation of
/// the trigger that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchPlan {
    pub generation: u64,
    pub request: FetchRequest,
}

/// The four reload requests of the cascade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchRequest {
    Dates,
    Stations {
        date_from: String,
        date_to: String,
    },
    Recipes {
        date_from: String,
        date_to: String,
        station: String,
    },
    Lots {
        date_from: String,
        date_to: String,
        station: String,
        recipe: String,
        /// Lot-stage policy once the response lands: select every returned
        /// option, or intersect with the selection before the trigger.
        select_all: bool,
    },
}

impl FetchRequest {
    /// Endpoint path for this request.
    pub fn path(&self) -> &'static str {
        match self {
            FetchRequest::Dates => DATES_ENDPOINT,
            FetchRequest::Stations { .. } => MACHINES_ENDPOINT,
            FetchRequest::Recipes { .. } => RECIPES_ENDPOINT,
            FetchRequest::Lots { .. } => LOTS_ENDPOINT,
        }
    }

    /// Wire query pairs for this request. The recipe travels as `product`,
    /// matching the backend's parameter name; `select_all` is client-side
    /// policy and never leaves the process.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        match self {
            FetchRequest::Dates => Vec::new(),
            FetchRequest::Stations { date_from, date_to } => vec![
                ("date_from", date_from.clone()),
                ("date_to", date_to.clone()),
            ],
            FetchRequest::Recipes {
                date_from,
                date_to,
                station,
            } => vec![
                ("date_from", date_from.clone()),
                ("date_to", date_to.clone()),
                ("station", station.clone()),
            ],
            FetchRequest::Lots {
                date_from,
                date_to,
                station,
                recipe,
                ..
            } => vec![
                ("date_from", date_from.clone()),
                ("date_to", date_to.clone()),
                ("station", station.clone()),
                ("product", recipe.clone()),
            ],
        }
    }
}

/// The filter cascade state.
///
/// Created empty at startup; [`FilterCascade::begin`] starts the initial
/// chain. All state lives here - no ambient globals - so the controller is
/// unit-testable without a DOM or a server.
#[derive(Debug, Clone, Default)]
pub struct FilterCascade {
    /// Shared option list for the DateFrom and DateTo stages.
    dates: Vec<String>,
    date_from: String,
    date_to: String,
    stations: Vec<String>,
    station: String,
    recipes: Vec<String>,
    recipe: String,
    lots: Vec<String>,
    selected_lots: BTreeSet<String>,
    /// Bumped by every trigger; plans carry the value at dispatch time.
    generation: u64,
    /// Lot selection captured when a preserve-mode chain was triggered.
    lot_snapshot: BTreeSet<String>,
    /// Whether the chain in flight reloads lots in select-all mode.
    chain_select_all: bool,
    /// Set once the Lot stage has been populated at least once.
    lots_loaded: bool,
}

impl FilterCascade {
    pub fn new() -> Self {
        FilterCascade::default()
    }

    // --- accessors ---

    /// Options shared by the DateFrom and DateTo stages.
    pub fn date_options(&self) -> &[String] {
        &self.dates
    }

    pub fn date_from(&self) -> &str {
        &self.date_from
    }

    pub fn date_to(&self) -> &str {
        &self.date_to
    }

    pub fn station_options(&self) -> &[String] {
        &self.stations
    }

    pub fn station(&self) -> &str {
        &self.station
    }

    pub fn recipe_options(&self) -> &[String] {
        &self.recipes
    }

    pub fn recipe(&self) -> &str {
        &self.recipe
    }

    pub fn lot_options(&self) -> &[String] {
        &self.lots
    }

    pub fn selected_lots(&self) -> &BTreeSet<String> {
        &self.selected_lots
    }

    pub fn is_lot_selected(&self, lot: &str) -> bool {
        self.selected_lots.contains(lot)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    // --- triggers ---

    /// Start (or restart) the cascade from the top.
    ///
    /// Clears everything and returns the `/filter/dates` fetch. The first
    /// Lot population after this selects every returned option.
    pub fn begin(&mut self) -> FetchPlan {
        self.begin_chain(true);
        self.dates.clear();
        self.date_from.clear();
        self.date_to.clear();
        self.clear_descendants(Stage::DateFrom);
        self.plan(FetchRequest::Dates)
    }

    /// The user picked a new DateFrom value.
    pub fn select_date_from(&mut self, value: impl Into<String>) -> Option<FetchPlan> {
        self.date_from = value.into();
        self.date_range_changed(Stage::DateFrom)
    }

    /// The user picked a new DateTo value.
    pub fn select_date_to(&mut self, value: impl Into<String>) -> Option<FetchPlan> {
        self.date_to = value.into();
        self.date_range_changed(Stage::DateTo)
    }

    fn date_range_changed(&mut self, stage: Stage) -> Option<FetchPlan> {
        self.begin_chain(false);
        self.clear_descendants(stage);
        if self.date_from.is_empty() || self.date_to.is_empty() {
            debug!("{stage} changed with incomplete date range; cascade idle");
            return None;
        }
        Some(self.plan(FetchRequest::Stations {
            date_from: self.date_from.clone(),
            date_to: self.date_to.clone(),
        }))
    }

    /// The user picked a new station.
    pub fn select_station(&mut self, value: impl Into<String>) -> Option<FetchPlan> {
        self.station = value.into();
        self.begin_chain(false);
        self.clear_descendants(Stage::Station);
        if self.date_from.is_empty() || self.date_to.is_empty() || self.station.is_empty() {
            debug!("station changed with unselected ancestors; cascade idle");
            return None;
        }
        Some(self.plan(FetchRequest::Recipes {
            date_from: self.date_from.clone(),
            date_to: self.date_to.clone(),
            station: self.station.clone(),
        }))
    }

    /// The user picked a new recipe.
    ///
    /// A recipe change invalidates the meaning of any prior lot selection,
    /// so the reloaded Lot stage selects every returned option.
    pub fn select_recipe(&mut self, value: impl Into<String>) -> Option<FetchPlan> {
        self.recipe = value.into();
        self.begin_chain(true);
        self.clear_descendants(Stage::Recipe);
        if self.date_from.is_empty()
            || self.date_to.is_empty()
            || self.station.is_empty()
            || self.recipe.is_empty()
        {
            debug!("recipe changed with unselected ancestors; cascade idle");
            return None;
        }
        Some(self.lots_plan())
    }

    /// Replace the Lot selection. Values not in the current option list are
    /// ignored. No fetch: the Lot stage has no descendants.
    pub fn select_lots<I, S>(&mut self, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let requested: BTreeSet<String> = values.into_iter().map(Into::into).collect();
        self.selected_lots = self
            .lots
            .iter()
            .filter(|lot| requested.contains(*lot))
            .cloned()
            .collect();
    }

    /// Flip one lot in or out of the selection.
    pub fn toggle_lot(&mut self, value: &str) {
        if !self.lots.iter().any(|lot| lot == value) {
            return;
        }
        if !self.selected_lots.remove(value) {
            self.selected_lots.insert(value.to_string());
        }
    }

    // --- response application ---

    /// Apply the `/filter/dates` response.
    ///
    /// Populates both date stages; defaults DateFrom to the earliest date
    /// and DateTo to the latest. Chains to the station reload.
    pub fn apply_dates(&mut self, generation: u64, dates: Vec<String>) -> Option<FetchPlan> {
        if self.is_stale(generation) {
            return None;
        }
        self.dates = dates;
        if let (Some(first), Some(last)) = (self.dates.first(), self.dates.last()) {
            self.date_from = first.clone();
            self.date_to = last.clone();
        }
        if self.date_from.is_empty() || self.date_to.is_empty() {
            return None;
        }
        Some(self.plan(FetchRequest::Stations {
            date_from: self.date_from.clone(),
            date_to: self.date_to.clone(),
        }))
    }

    /// Apply the `/filter/machines` response.
    ///
    /// Default-selects the first station; an empty result ends the chain
    /// with the descendant stages left empty.
    pub fn apply_stations(&mut self, generation: u64, stations: Vec<String>) -> Option<FetchPlan> {
        if self.is_stale(generation) {
            return None;
        }
        self.stations = stations;
        self.station = self.stations.first()?.clone();
        Some(self.plan(FetchRequest::Recipes {
            date_from: self.date_from.clone(),
            date_to: self.date_to.clone(),
            station: self.station.clone(),
        }))
    }

    /// Apply the `/filter/recipes` response.
    ///
    /// Default-selects the first recipe and chains to the lot reload.
    pub fn apply_recipes(&mut self, generation: u64, recipes: Vec<String>) -> Option<FetchPlan> {
        if self.is_stale(generation) {
            return None;
        }
        self.recipes = recipes;
        self.recipe = self.recipes.first()?.clone();
        Some(self.lots_plan())
    }

    /// Apply the `/filter/lots` response, ending the chain.
    ///
    /// In select-all mode every returned lot is selected. In preserve mode
    /// the selection becomes the trigger-time snapshot intersected with the
    /// new option list; vanished values are dropped silently.
    pub fn apply_lots(&mut self, generation: u64, select_all: bool, lots: Vec<String>) {
        if self.is_stale(generation) {
            return;
        }
        self.lots = lots;
        self.lots_loaded = true;
        self.selected_lots = if select_all {
            self.lots.iter().cloned().collect()
        } else {
            self.lots
                .iter()
                .filter(|lot| self.lot_snapshot.contains(*lot))
                .cloned()
                .collect()
        };
    }

    // --- terminal action ---

    /// Assemble the dashboard query from the current selections.
    ///
    /// The date range is required. Station, recipe and lots may be empty -
    /// an empty lot set means "no lot filter", not "query nothing".
    pub fn assemble_query_parameters(&self) -> Result<TrendQuery, CascadeError> {
        if self.date_from.is_empty() || self.date_to.is_empty() {
            return Err(CascadeError::MissingDateRange);
        }
        Ok(TrendQuery {
            date_from: self.date_from.clone(),
            date_to: self.date_to.clone(),
            station: self.station.clone(),
            recipe: self.recipe.clone(),
            lots: self.selected_lots.iter().cloned().collect(),
        })
    }

    // --- internals ---

    fn begin_chain(&mut self, select_all: bool) {
        self.generation += 1;
        self.chain_select_all = select_all;
        // A superseded chain already cleared the Lot stage; keep the last
        // real selection as the preserve-mode baseline in that case.
        if !self.lots.is_empty() {
            self.lot_snapshot = self.selected_lots.clone();
        }
    }

    fn lots_plan(&self) -> FetchPlan {
        self.plan(FetchRequest::Lots {
            date_from: self.date_from.clone(),
            date_to: self.date_to.clone(),
            station: self.station.clone(),
            recipe: self.recipe.clone(),
            select_all: self.chain_select_all || !self.lots_loaded,
        })
    }

    fn plan(&self, request: FetchRequest) -> FetchPlan {
        FetchPlan {
            generation: self.generation,
            request,
        }
    }

    fn is_stale(&self, generation: u64) -> bool {
        if generation != self.generation {
            debug!(
                "discarding response for superseded chain (generation {generation}, current {})",
                self.generation
            );
            return true;
        }
        false
    }

    fn clear_descendants(&mut self, stage: Stage) {
        for descendant in stage.descendants() {
            self.clear_stage(*descendant);
        }
    }

    fn clear_stage(&mut self, stage: Stage) {
        match stage {
            Stage::DateFrom | Stage::DateTo => {
                self.dates.clear();
                self.date_from.clear();
                self.date_to.clear();
            }
            Stage::Station => {
                self.stations.clear();
                self.station.clear();
            }
            Stage::Recipe => {
                self.recipes.clear();
                self.recipe.clear();
            }
            Stage::Lot => {
                self.lots.clear();
                self.selected_lots.clear();
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::{CascadeError, FetchRequest, FilterCascade};

    fn dates() -> Vec<String> {
        vec!["2024-01-01".to_string(), "2024-01-02".to_string()]
    }

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    /// Drive a full chain to a settled state: dates -> M1 -> R1 -> L1, L2
    /// with every lot selected.
    fn settled() -> FilterCascade {
        let mut cascade = FilterCascade::new();
        let plan = cascade.begin();
        let plan = cascade.apply_dates(plan.generation, dates()).unwrap();
        let plan = cascade
            .apply_stations(plan.generation, ids(&["M1"]))
            .unwrap();
        let plan = cascade
            .apply_recipes(plan.generation, ids(&["R1"]))
            .unwrap();
        match plan.request {
            FetchRequest::Lots { select_all, .. } => {
                cascade.apply_lots(plan.generation, select_all, ids(&["L1", "L2"]));
            }
            other => panic!("expected a lots fetch, got {other:?}"),
        }
        cascade
    }

    #[test]
    fn test_initial_load_defaults_to_full_date_span() {
        let mut cascade = FilterCascade::new();
        let plan = cascade.begin();
        assert_eq!(plan.request, FetchRequest::Dates);

        let next = cascade.apply_dates(plan.generation, dates()).unwrap();
        assert_eq!(cascade.date_from(), "2024-01-01");
        assert_eq!(cascade.date_to(), "2024-01-02");
        assert_eq!(
            next.request,
            FetchRequest::Stations {
                date_from: "2024-01-01".to_string(),
                date_to: "2024-01-02".to_string(),
            }
        );
    }

    #[test]
    fn test_empty_date_list_leaves_cascade_idle() {
        let mut cascade = FilterCascade::new();
        let plan = cascade.begin();
        assert!(cascade.apply_dates(plan.generation, Vec::new()).is_none());
        assert!(cascade.date_from().is_empty());
        assert!(cascade.date_to().is_empty());
        assert!(cascade.station_options().is_empty());
    }

    #[test]
    fn test_first_lot_load_selects_all() {
        let cascade = settled();
        assert_eq!(cascade.lot_options(), ids(&["L1", "L2"]).as_slice());
        assert!(cascade.is_lot_selected("L1"));
        assert!(cascade.is_lot_selected("L2"));
    }

    #[test]
    fn test_end_to_end_query_assembly() {
        let mut cascade = settled();
        cascade.select_lots(["L1"]);

        let query = cascade.assemble_query_parameters().unwrap();
        assert_eq!(query.date_from, "2024-01-01");
        assert_eq!(query.date_to, "2024-01-02");
        assert_eq!(query.station, "M1");
        assert_eq!(query.recipe, "R1");
        assert_eq!(query.lots, vec!["L1".to_string()]);
    }

    #[test]
    fn test_ancestor_change_clears_descendants_before_resolution() {
        let mut cascade = settled();
        let plan = cascade.select_station("M2");

        // Between the trigger and the response every descendant is empty.
        assert!(cascade.recipe_options().is_empty());
        assert!(cascade.recipe().is_empty());
        assert!(cascade.lot_options().is_empty());
        assert!(cascade.selected_lots().is_empty());
        assert_eq!(cascade.station(), "M2");
        assert!(plan.is_some());
    }

    #[test]
    fn test_date_change_with_missing_other_end_is_a_no_op() {
        let mut cascade = FilterCascade::new();
        assert!(cascade.select_date_from("2024-01-01").is_none());
        assert!(cascade.station_options().is_empty());
        assert!(cascade.recipe_options().is_empty());
        assert!(cascade.lot_options().is_empty());
    }

    #[test]
    fn test_lot_preservation_on_station_change() {
        let mut cascade = settled();
        cascade.select_lots(["L1", "L3"]);

        // A station change chains straight to the recipe reload.
        let plan = cascade.select_station("M2").unwrap();
        let plan = cascade.apply_recipes(plan.generation, ids(&["R1"])).unwrap();
        let select_all = match &plan.request {
            FetchRequest::Lots { select_all, .. } => *select_all,
            other => panic!("expected a lots fetch, got {other:?}"),
        };
        assert!(!select_all);

        cascade.apply_lots(plan.generation, select_all, ids(&["L2", "L3", "L4"]));
        let selected: Vec<&str> = cascade.selected_lots().iter().map(String::as_str).collect();
        assert_eq!(selected, vec!["L3"]);
    }

    #[test]
    fn test_recipe_change_selects_every_new_lot() {
        let mut cascade = settled();
        cascade.select_lots(["L1"]);

        let plan = cascade.select_recipe("R2").unwrap();
        let select_all = match &plan.request {
            FetchRequest::Lots { select_all, recipe, .. } => {
                assert_eq!(recipe, "R2");
                *select_all
            }
            other => panic!("expected a lots fetch, got {other:?}"),
        };
        assert!(select_all);

        cascade.apply_lots(plan.generation, select_all, ids(&["L7", "L8"]));
        assert!(cascade.is_lot_selected("L7"));
        assert!(cascade.is_lot_selected("L8"));
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut cascade = settled();
        let first = cascade.select_date_to("2024-01-01").unwrap();
        let second = cascade.select_date_to("2024-01-02").unwrap();
        assert_eq!(second.generation, cascade.generation());

        // The first chain's response resolves after the second trigger.
        assert!(cascade
            .apply_stations(first.generation, ids(&["MX"]))
            .is_none());
        assert!(cascade.station_options().is_empty());
        assert!(cascade.station().is_empty());

        // The live chain still applies.
        assert!(cascade
            .apply_stations(second.generation, ids(&["M1", "M2"]))
            .is_some());
        assert_eq!(cascade.station_options(), ids(&["M1", "M2"]).as_slice());
        assert_eq!(cascade.station(), "M1");
    }

    #[test]
    fn test_snapshot_survives_a_superseded_chain() {
        let mut cascade = settled();
        cascade.select_lots(["L1"]);

        // Two rapid triggers: the second starts while the Lot stage is
        // empty, but the preserve baseline is still {"L1"}.
        cascade.select_date_to("2024-01-01");
        let plan = cascade.select_station("M2").unwrap();
        let plan = cascade.apply_recipes(plan.generation, ids(&["R1"])).unwrap();
        let select_all = match &plan.request {
            FetchRequest::Lots { select_all, .. } => *select_all,
            other => panic!("expected a lots fetch, got {other:?}"),
        };
        cascade.apply_lots(plan.generation, select_all, ids(&["L1", "L5"]));

        let selected: Vec<&str> = cascade.selected_lots().iter().map(String::as_str).collect();
        assert_eq!(selected, vec!["L1"]);
    }

    #[test]
    fn test_station_reload_is_idempotent() {
        let mut cascade = settled();

        let plan = cascade.select_date_to("2024-01-01").unwrap();
        cascade.apply_stations(plan.generation, ids(&["M1", "M2"]));
        let first_options = cascade.station_options().to_vec();
        let first_selection = cascade.station().to_string();

        let plan = cascade.select_date_to("2024-01-01").unwrap();
        cascade.apply_stations(plan.generation, ids(&["M1", "M2"]));
        assert_eq!(cascade.station_options(), first_options.as_slice());
        assert_eq!(cascade.station(), first_selection);
    }

    #[test]
    fn test_empty_station_result_ends_the_chain() {
        let mut cascade = settled();
        let plan = cascade.select_date_to("2024-01-01").unwrap();
        assert!(cascade.apply_stations(plan.generation, Vec::new()).is_none());
        assert!(cascade.station().is_empty());
        assert!(cascade.recipe_options().is_empty());
        assert!(cascade.lot_options().is_empty());
    }

    #[test]
    fn test_select_lots_ignores_unknown_values() {
        let mut cascade = settled();
        cascade.select_lots(["L1", "L9"]);
        let selected: Vec<&str> = cascade.selected_lots().iter().map(String::as_str).collect();
        assert_eq!(selected, vec!["L1"]);
    }

    #[test]
    fn test_toggle_lot() {
        let mut cascade = settled();
        cascade.toggle_lot("L1");
        assert!(!cascade.is_lot_selected("L1"));
        cascade.toggle_lot("L1");
        assert!(cascade.is_lot_selected("L1"));
        // Unknown values are ignored.
        cascade.toggle_lot("L9");
        assert!(!cascade.is_lot_selected("L9"));
    }

    #[test]
    fn test_assembly_allows_empty_optional_fields() {
        let mut cascade = FilterCascade::new();
        let plan = cascade.begin();
        cascade.apply_dates(
            plan.generation,
            vec!["2024-01-01".to_string(), "2024-01-31".to_string()],
        );

        let query = cascade.assemble_query_parameters().unwrap();
        assert_eq!(query.date_from, "2024-01-01");
        assert_eq!(query.date_to, "2024-01-31");
        assert!(query.station.is_empty());
        assert!(query.recipe.is_empty());
        assert!(query.lots.is_empty());
    }

    #[test]
    fn test_assembly_requires_a_date_range() {
        let cascade = FilterCascade::new();
        assert_eq!(
            cascade.assemble_query_parameters(),
            Err(CascadeError::MissingDateRange)
        );
    }

    #[test]
    fn test_lots_request_wire_pairs() {
        let cascade = settled();
        let plan = cascade.clone().select_recipe("R2").unwrap();
        assert_eq!(plan.request.path(), "/filter/lots");
        assert_eq!(
            plan.request.query_pairs(),
            vec![
                ("date_from", "2024-01-01".to_string()),
                ("date_to", "2024-01-02".to_string()),
                ("station", "M1".to_string()),
                ("product", "R2".to_string()),
            ]
        );
    }
}
