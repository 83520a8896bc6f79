use chrono::{Local, NaiveDate};
use std::collections::BTreeSet;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::models::{
    aggregate::RawDataPoint,
    options::DimensionOptions,
    selection::{AggregateQuery, GroupBy, SelectionState},
};
use crate::services::api::{EnergyApi, EnergyClient};

#[derive(Clone, PartialEq, Debug)]
pub enum OptionsState {
    Loading,
    Loaded(Rc<DimensionOptions>),
    Error(String),
}

impl OptionsState {
    pub fn options(&self) -> Option<&Rc<DimensionOptions>> {
        match self {
            OptionsState::Loaded(options) => Some(options),
            _ => None,
        }
    }
}

#[derive(Clone, PartialEq, Debug)]
pub enum DataState {
    Idle,
    Loading,
    Loaded(Rc<Vec<RawDataPoint>>),
    Error(String),
}

impl DataState {
    /// Returns true if the state is loading
    pub fn is_loading(&self) -> bool {
        matches!(self, DataState::Loading)
    }

    /// Returns the data if it is loaded
    pub fn data(&self) -> Option<&Rc<Vec<RawDataPoint>>> {
        match self {
            DataState::Loaded(points) => Some(points),
            _ => None,
        }
    }
}

#[derive(Clone, PartialEq, Debug)]
pub enum DashboardAction {
    OptionsLoaded(Result<Rc<DimensionOptions>, String>),
    SetStartDate(NaiveDate),
    SetEndDate(NaiveDate),
    SetFrequency(String),
    SetMetric(String),
    SetFuelCodes(BTreeSet<String>),
    SetPrimeMovers(BTreeSet<String>),
    SetStateCodes(BTreeSet<String>),
    Reset { today: NaiveDate },
    /// Request `seq` was issued; anything older is now stale.
    AggregateRequested { seq: u64 },
    /// Request `seq` was skipped by the guard; anything older is now stale.
    AggregateCleared { seq: u64 },
    AggregateCompleted {
        seq: u64,
        result: Result<Vec<RawDataPoint>, String>,
    },
}

/// State owned by the dashboard page.
///
/// Every transition goes through [`Dashboard::apply`]; network effects live in
/// [`use_dashboard`] and report back with actions.
#[derive(Clone, PartialEq, Debug)]
pub struct Dashboard {
    pub options: OptionsState,
    pub selection: SelectionState,
    pub data: DataState,
    latest_request: u64,
    revision: u64,
}

impl Dashboard {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            options: OptionsState::Loading,
            selection: SelectionState::new(today),
            data: DataState::Idle,
            latest_request: 0,
            revision: 0,
        }
    }

    pub fn options_loaded(&self) -> bool {
        matches!(self.options, OptionsState::Loaded(_))
    }

    /// The request the current selection calls for, or `None` when options
    /// are not loaded or no metric is selected.
    pub fn aggregate_query(&self) -> Option<AggregateQuery> {
        if !self.options_loaded() {
            return None;
        }
        AggregateQuery::from_selection(&self.selection)
    }

    pub fn group_by(&self) -> GroupBy {
        self.selection.group_by()
    }

    pub fn latest_request(&self) -> u64 {
        self.latest_request
    }

    /// Bumped by every reset so an unchanged selection still refetches.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn apply(&mut self, action: DashboardAction) {
        match action {
            DashboardAction::OptionsLoaded(Ok(options)) => {
                self.selection.frequency = options.default_frequency();
                self.selection.metric = options.default_metric();
                self.options = OptionsState::Loaded(options);
            }
            DashboardAction::OptionsLoaded(Err(message)) => {
                self.options = OptionsState::Error(message);
                self.data = DataState::Idle;
            }
            DashboardAction::SetStartDate(date) => self.selection.date_range.start = date,
            DashboardAction::SetEndDate(date) => self.selection.date_range.end = date,
            DashboardAction::SetFrequency(code) => self.selection.frequency = Some(code),
            DashboardAction::SetMetric(code) => self.selection.metric = Some(code),
            DashboardAction::SetFuelCodes(codes) => self.selection.fuel_codes = codes,
            DashboardAction::SetPrimeMovers(codes) => self.selection.prime_movers = codes,
            DashboardAction::SetStateCodes(codes) => self.selection.state_codes = codes,
            DashboardAction::Reset { today } => {
                self.selection = match self.options.options() {
                    Some(options) => SelectionState::defaults(today, options),
                    None => SelectionState::new(today),
                };
                self.revision += 1;
            }
            DashboardAction::AggregateRequested { seq } => {
                self.latest_request = self.latest_request.max(seq);
                if seq == self.latest_request {
                    self.data = DataState::Loading;
                }
            }
            DashboardAction::AggregateCleared { seq } => {
                self.latest_request = self.latest_request.max(seq);
                if seq == self.latest_request {
                    self.data = DataState::Idle;
                }
            }
            DashboardAction::AggregateCompleted { seq, result } => {
                // Older responses must never overwrite a newer request's result
                if seq != self.latest_request {
                    return;
                }
                self.data = match result {
                    Ok(points) => DataState::Loaded(Rc::new(points)),
                    Err(message) => DataState::Error(message),
                };
            }
        }
    }
}

impl Reducible for Dashboard {
    type Action = DashboardAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        next.apply(action);
        Rc::new(next)
    }
}

/// What a change of the derived query calls for.
#[derive(Clone, PartialEq, Debug)]
pub enum FetchPlan {
    /// The guard failed; drop the current data.
    Cleared { seq: u64 },
    /// Issue `query` as request `seq`.
    Requested { seq: u64, query: AggregateQuery },
}

impl FetchPlan {
    /// The action announcing this plan to the reducer.
    pub fn action(&self) -> DashboardAction {
        match self {
            FetchPlan::Cleared { seq } => DashboardAction::AggregateCleared { seq: *seq },
            FetchPlan::Requested { seq, .. } => DashboardAction::AggregateRequested { seq: *seq },
        }
    }
}

/// Turns `(query, revision)` changes into numbered requests.
///
/// An unchanged key yields nothing, so re-renders never refetch; a reset bumps
/// the revision and always does.
#[derive(Debug, Default)]
pub struct FetchPlanner {
    last_key: Option<(Option<AggregateQuery>, u64)>,
    seq: u64,
}

impl FetchPlanner {
    pub fn plan(&mut self, query: Option<&AggregateQuery>, revision: u64) -> Option<FetchPlan> {
        let key = (query.cloned(), revision);
        if self.last_key.as_ref() == Some(&key) {
            return None;
        }

        self.seq += 1;
        let seq = self.seq;
        let plan = match &key.0 {
            None => FetchPlan::Cleared { seq },
            Some(query) => FetchPlan::Requested {
                seq,
                query: query.clone(),
            },
        };
        self.last_key = Some(key);
        Some(plan)
    }

    /// Convenience for [`FetchPlanner::plan`] on a dashboard's current state.
    pub fn plan_for(&mut self, dashboard: &Dashboard) -> Option<FetchPlan> {
        self.plan(dashboard.aggregate_query().as_ref(), dashboard.revision())
    }

    /// Whether `seq` is still the newest request.
    pub fn is_current(&self, seq: u64) -> bool {
        seq == self.seq
    }
}

/// Loads all filter options and reports the outcome as a single action.
pub async fn load_options<A: EnergyApi>(api: &A) -> DashboardAction {
    let result = api
        .fetch_filter_options()
        .await
        .map(Rc::new)
        .map_err(|e| format!("Failed to load filter options: {e}"));

    DashboardAction::OptionsLoaded(result)
}

/// Runs aggregate request `seq` and reports its completion.
pub async fn fetch_aggregate<A: EnergyApi>(
    api: &A,
    seq: u64,
    query: &AggregateQuery,
) -> DashboardAction {
    let result = api
        .fetch_aggregate(query)
        .await
        .map_err(|e| format!("Failed to load chart data: {e}"));

    DashboardAction::AggregateCompleted { seq, result }
}

#[hook]
pub fn use_dashboard(client: EnergyClient) -> UseReducerHandle<Dashboard> {
    let state = use_reducer(|| Dashboard::new(Local::now().date_naive()));
    let planner = use_mut_ref(FetchPlanner::default);

    // Filter options: once, on mount
    {
        let dispatcher = state.dispatcher();
        let client = client.clone();

        use_effect_with((), move |_| {
            gloo::console::log!("Loading filter options");

            spawn_local(async move {
                let action = load_options(&client).await;
                if let DashboardAction::OptionsLoaded(Err(message)) = &action {
                    gloo::console::error!(message);
                }
                dispatcher.dispatch(action);
            });

            || ()
        });
    }

    // Aggregate data: whenever the derived query changes or a reset happens
    {
        let dispatcher = state.dispatcher();
        let query = state.aggregate_query();
        let revision = state.revision();

        use_effect_with((query, revision), move |(query, revision)| {
            let plan = planner.borrow_mut().plan(query.as_ref(), *revision);

            if let Some(plan) = plan {
                dispatcher.dispatch(plan.action());

                if let FetchPlan::Requested { seq, query } = plan {
                    gloo::console::log!(format!("Aggregate request #{seq} issued"));

                    spawn_local(async move {
                        let action = fetch_aggregate(&client, seq, &query).await;
                        if !planner.borrow().is_current(seq) {
                            gloo::console::warn!(format!(
                                "Aggregate request #{seq} superseded, discarding response"
                            ));
                        } else if let DashboardAction::AggregateCompleted {
                            result: Err(message),
                            ..
                        } = &action
                        {
                            gloo::console::error!(message);
                        }
                        dispatcher.dispatch(action);
                    });
                }
            }

            || ()
        });
    }

    state
}
