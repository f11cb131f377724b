//! Application-wide shared state with explicit actions and subscribers.
//!
//! [`Store`] is a small reducer store: `dispatch` runs the reducer and then notifies every
//! subscriber with the new state. [`app_store`] wires up the theme and category slices.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Handle returned by [`Store::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

type Listener<S> = Box<dyn FnMut(&S)>;

/// Reducer store over state `S` and actions `A`.
pub struct Store<S, A> {
    state: S,
    reducer: fn(&S, &A) -> S,
    listeners: BTreeMap<SubscriptionId, Listener<S>>,
    next_id: u64,
}

impl<S, A> Store<S, A> {
    /// Create a store with no subscribers.
    pub fn new(initial: S, reducer: fn(&S, &A) -> S) -> Self {
        Self {
            state: initial,
            reducer,
            listeners: BTreeMap::new(),
            next_id: 0,
        }
    }

    /// Current state.
    pub fn get_state(&self) -> &S {
        &self.state
    }

    /// Apply `action`, then notify subscribers in subscription order.
    pub fn dispatch(&mut self, action: A) {
        self.state = (self.reducer)(&self.state, &action);
        for listener in self.listeners.values_mut() {
            listener(&self.state);
        }
    }

    /// Register `listener` to run after every dispatch.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&S) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.insert(id, Box::new(listener));
        id
    }

    /// Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.remove(&id).is_some()
    }

    /// Number of registered listeners.
    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }
}

/// Light or dark UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ThemeState {
    pub mode: ThemeMode,
}

/// An expense category as listed by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CategoryState {
    pub categories: Vec<Category>,
}

/// Combined application state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    pub theme: ThemeState,
    pub category: CategoryState,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    ToggleTheme,
    SetTheme(ThemeMode),
    SetCategories(Vec<Category>),
    /// Adds or replaces by id.
    AddCategory(Category),
    RemoveCategory { id: String },
}

fn theme_reducer(state: &ThemeState, action: &AppAction) -> ThemeState {
    match action {
        AppAction::ToggleTheme => ThemeState {
            mode: match state.mode {
                ThemeMode::Light => ThemeMode::Dark,
                ThemeMode::Dark => ThemeMode::Light,
            },
        },
        AppAction::SetTheme(mode) => ThemeState { mode: *mode },
        _ => state.clone(),
    }
}

fn category_reducer(state: &CategoryState, action: &AppAction) -> CategoryState {
    match action {
        AppAction::SetCategories(categories) => CategoryState {
            categories: categories.clone(),
        },
        AppAction::AddCategory(category) => {
            let mut categories: Vec<Category> = state
                .categories
                .iter()
                .filter(|c| c.id != category.id)
                .cloned()
                .collect();
            categories.push(category.clone());
            CategoryState { categories }
        }
        AppAction::RemoveCategory { id } => CategoryState {
            categories: state.categories.iter().filter(|c| &c.id != id).cloned().collect(),
        },
        _ => state.clone(),
    }
}

/// Root reducer: each slice sees every action.
pub fn app_reducer(state: &AppState, action: &AppAction) -> AppState {
    AppState {
        theme: theme_reducer(&state.theme, action),
        category: category_reducer(&state.category, action),
    }
}

/// A store over [`AppState`] with default initial state.
pub fn app_store() -> Store<AppState, AppAction> {
    Store::new(AppState::default(), app_reducer)
}
