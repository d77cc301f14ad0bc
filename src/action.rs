//! Actions - every state change goes through one of these

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::model::{ListResult, Pokemon};

#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    // ===== Search category =====
    /// Focus the search bar
    SearchStart,
    /// Leave the search bar, restoring the active term
    SearchCancel,
    SearchInput(char),
    SearchBackspace,
    /// Submit the typed text as the active filter
    SearchSubmit,
    /// Run a search for the given term directly (start-up, replay)
    SearchRun(String),

    // ===== List category =====
    /// Result: page fetch `generation` succeeded
    ListDidLoad { generation: u64, result: ListResult },
    /// Result: page fetch `generation` failed
    ListDidError { generation: u64, error: String },
    ListSelect(usize),
    ListOpenSelected,

    // ===== Page category =====
    PageNext,
    PagePrev,
    /// Jump to a page (digit keys)
    PageGoto(u32),

    // ===== Limit category =====
    /// Next larger page size option
    LimitNext,
    /// Next smaller page size option
    LimitPrev,

    // ===== Detail category =====
    /// Intent: show one Pokemon (triggers a load)
    DetailOpen(String),
    DetailDidLoad(Pokemon),
    DetailDidError { id: String, error: String },
    DetailBack,

    // ===== Form category =====
    FormOpenCreate,
    /// Edit the Pokemon on the detail screen
    FormOpenEdit,
    FormFocusNext,
    FormFocusPrev,
    FormInput(char),
    FormBackspace,
    /// Move the typed type into the type list
    FormAddType,
    FormSubmit,
    FormCancel,

    // ===== Create / Update results =====
    CreateDidLoad(Pokemon),
    CreateDidError(String),
    UpdateDidLoad(Pokemon),
    UpdateDidError(String),

    // ===== Delete category =====
    /// Ask for confirmation
    DeleteRequest,
    DeleteCancel,
    DeleteConfirm,
    DeleteDidLoad(String),
    DeleteDidError(String),

    // ===== Uncategorized (global) =====
    /// Spinner tick
    Tick,
    Quit,
}
