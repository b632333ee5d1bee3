//! The upload / analyze / history workflow.

mod machine;

use std::rc::Rc;

use gloo_file::{File, ObjectUrl};
use shared::fmt::format_confidence;
use shared::{ApiError, NewPrediction, PredictResponse, PredictionLabel, PredictionRecord};
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::spawn_local;
use web_sys::{DragEvent, FileList, HtmlInputElement};
use yew::prelude::*;

use crate::api;
use crate::config::Config;
use crate::db::Database;
use crate::session::Session;
use machine::Submission;

const HISTORY_TABLE: &str = "predictions";
const HISTORY_LIMIT: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Analyze,
    History,
}

/// Selected file plus its preview URL. `ObjectUrl` revokes on drop, so reset,
/// re-selection, and unmount all release the browser resource exactly once.
struct SelectedImage {
    file: File,
    preview: ObjectUrl,
}

#[derive(Properties, PartialEq)]
pub struct CheckingProps {
    pub session: Session,
    pub config: Rc<Config>,
    pub on_back_to_home: Callback<()>,
}

pub enum Msg {
    ImageSelected(File),
    SetDragOver(bool),
    HandleDrop(DragEvent),
    Submit,
    Predicted(PredictResponse),
    SubmitFailed(String),
    RefreshHistory,
    HistoryLoaded(Vec<PredictionRecord>),
    HistoryFailed(String),
    ResetForm,
    SetTab(Tab),
    Logout,
}

pub struct CheckingPage {
    selected: Option<SelectedImage>,
    submission: Submission,
    history: Vec<PredictionRecord>,
    error: Option<String>,
    active_tab: Tab,
    drag_over: bool,
}

impl Component for CheckingPage {
    type Message = Msg;
    type Properties = CheckingProps;

    fn create(ctx: &Context<Self>) -> Self {
        ctx.link().send_message(Msg::RefreshHistory);
        Self {
            selected: None,
            submission: Submission::default(),
            history: Vec::new(),
            error: None,
            active_tab: Tab::Analyze,
            drag_over: false,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::ImageSelected(file) => self.handle_image_selected(file),
            Msg::SetDragOver(over) => {
                self.drag_over = over;
                true
            }
            Msg::HandleDrop(event) => self.handle_drop(event),
            Msg::Submit => self.handle_submit(ctx),
            Msg::Predicted(outcome) => self.handle_predicted(ctx, outcome),
            Msg::SubmitFailed(reason) => self.handle_submit_failed(reason),
            Msg::RefreshHistory => self.refresh_history(ctx),
            Msg::HistoryLoaded(records) => {
                self.history = records;
                self.error = None;
                true
            }
            Msg::HistoryFailed(reason) => {
                log::error!("failed to load history: {reason}");
                // Keep whatever list we already had.
                self.error = Some(reason);
                true
            }
            Msg::ResetForm => {
                self.selected = None;
                self.submission.reset();
                true
            }
            Msg::SetTab(tab) => {
                self.active_tab = tab;
                true
            }
            Msg::Logout => {
                Session::clear();
                ctx.props().on_back_to_home.emit(());
                false
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="checking-page">
                { self.render_header(ctx) }
                <main class="main-content">
                    { self.render_tabs(ctx) }
                    { self.render_error_message() }
                    {
                        match self.active_tab {
                            Tab::Analyze => self.render_analyze(ctx),
                            Tab::History => self.render_history(),
                        }
                    }
                    { render_tips() }
                </main>
            </div>
        }
    }
}

// Handler methods
impl CheckingPage {
    fn handle_image_selected(&mut self, file: File) -> bool {
        // Replacing the selection drops the previous preview URL; a fresh
        // selection also clears any verdict still on screen.
        let preview = ObjectUrl::from(file.clone());
        self.selected = Some(SelectedImage { file, preview });
        self.submission.reset();
        true
    }

    fn handle_drop(&mut self, event: DragEvent) -> bool {
        event.prevent_default();
        self.drag_over = false;

        let dropped = event
            .data_transfer()
            .and_then(|dt| dt.files())
            .as_ref()
            .and_then(first_image_file);

        match dropped {
            Some(file) => self.handle_image_selected(file),
            // Non-image drops are ignored; redraw only clears the highlight.
            None => true,
        }
    }

    fn handle_submit(&mut self, ctx: &Context<Self>) -> bool {
        if !self.submission.begin(self.selected.is_some()) {
            return false;
        }
        let Some(selected) = &self.selected else {
            return false;
        };

        let file = selected.file.clone();
        let config = ctx.props().config.clone();
        let user_id = ctx.props().session.user_id.clone();
        let link = ctx.link().clone();

        // Strictly sequenced: predict, then persist, then (on success) the
        // history refetch triggered by Msg::Predicted.
        spawn_local(async move {
            match api::predict(&config, &user_id, &file).await {
                Ok(outcome) => {
                    let row = NewPrediction {
                        image_path: file.name(),
                        result: outcome.result.clone(),
                        confidence: outcome.confidence,
                    };
                    match Database::from_config(&config).insert(HISTORY_TABLE, &row).await {
                        Ok(()) => link.send_message(Msg::Predicted(outcome)),
                        // A failed save after a good verdict reports as a
                        // plain analysis failure; see DESIGN.md.
                        Err(err) => link.send_message(Msg::SubmitFailed(err.to_string())),
                    }
                }
                Err(err) => link.send_message(Msg::SubmitFailed(err.to_string())),
            }
        });

        true
    }

    fn handle_predicted(&mut self, ctx: &Context<Self>, outcome: PredictResponse) -> bool {
        if !self.submission.succeed(outcome) {
            return false;
        }
        self.error = None;
        ctx.link().send_message(Msg::RefreshHistory);
        true
    }

    fn handle_submit_failed(&mut self, reason: String) -> bool {
        if !self.submission.fail() {
            return false;
        }
        log::error!("analysis failed: {reason}");
        self.error = Some(reason);
        true
    }

    fn refresh_history(&self, ctx: &Context<Self>) -> bool {
        let config = ctx.props().config.clone();
        let user_id = ctx.props().session.user_id.clone();
        let link = ctx.link().clone();

        spawn_local(async move {
            match fetch_history(&config, &user_id).await {
                Ok(records) => link.send_message(Msg::HistoryLoaded(records)),
                Err(err) => link.send_message(Msg::HistoryFailed(err.to_string())),
            }
        });

        false
    }
}

/// Two-tier retrieval: the user-scoped endpoint first; on an HTTP-level
/// rejection, read the table directly instead. Transport failures skip the
/// fallback and surface to the caller.
async fn fetch_history(config: &Config, user_id: &str) -> Result<Vec<PredictionRecord>, ApiError> {
    match api::recent_predictions(config, user_id).await {
        Ok(records) => Ok(records),
        Err(err) if err.diverts_to_fallback() => {
            log::warn!("history endpoint rejected the request ({err}); falling back to the database");
            Database::from_config(config)
                .select_recent(HISTORY_TABLE, HISTORY_LIMIT)
                .await
        }
        Err(err) => Err(err),
    }
}

/// First file in the list whose declared media type is an image. Everything
/// else is skipped with a log line and no user-facing rejection.
fn first_image_file(list: &FileList) -> Option<File> {
    for i in 0..list.length() {
        if let Some(file) = list.item(i) {
            if file.type_().starts_with("image/") {
                return Some(File::from(file));
            }
            log::warn!("skipping non-image file: {}", file.name());
        }
    }
    None
}

/// Abbreviated month, day and hour:minute, e.g. "Jun 1, 10:00 AM".
fn format_timestamp(iso: &str) -> String {
    let date = js_sys::Date::new(&JsValue::from_str(iso));
    let options = js_sys::Object::new();
    for (key, value) in [
        ("month", "short"),
        ("day", "numeric"),
        ("hour", "2-digit"),
        ("minute", "2-digit"),
    ] {
        let _ = js_sys::Reflect::set(
            &options,
            &JsValue::from_str(key),
            &JsValue::from_str(value),
        );
    }
    String::from(date.to_locale_string("en-US", &options))
}

// Rendering methods
impl CheckingPage {
    fn render_header(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let on_back = ctx.props().on_back_to_home.clone();

        html! {
            <header class="app-header">
                <div class="header-brand">
                    <i class="fa-solid fa-leaf"></i>
                    <div>
                        <h1>{"ArsenicGuard AI"}</h1>
                        <p
                            class="subtitle"
                            title={ctx.props().session.user_email.clone().unwrap_or_default()}
                        >
                            { format!("Hello, {}!", ctx.props().session.user_name) }
                        </p>
                    </div>
                </div>
                <div class="header-actions">
                    <button class="back-btn" onclick={Callback::from(move |_| on_back.emit(()))}>
                        <i class="fa-solid fa-arrow-left"></i>{" Back Home"}
                    </button>
                    <button class="logout-btn" onclick={link.callback(|_| Msg::Logout)}>
                        <i class="fa-solid fa-right-from-bracket"></i>{" Logout"}
                    </button>
                </div>
            </header>
        }
    }

    fn render_tabs(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let tab_class = |tab: Tab| {
            classes!("tab-btn", (self.active_tab == tab).then_some("active"))
        };

        html! {
            <div class="tab-bar">
                <button class={tab_class(Tab::Analyze)} onclick={link.callback(|_| Msg::SetTab(Tab::Analyze))}>
                    <i class="fa-solid fa-camera"></i>{" Analyze Plant"}
                </button>
                <button class={tab_class(Tab::History)} onclick={link.callback(|_| Msg::SetTab(Tab::History))}>
                    <i class="fa-solid fa-clock-rotate-left"></i>{" History"}
                </button>
            </div>
        }
    }

    fn render_error_message(&self) -> Html {
        if let Some(error_msg) = &self.error {
            html! {
                <div class="error-message">
                    <i class="fa-solid fa-circle-exclamation"></i>
                    <p>{ error_msg }</p>
                </div>
            }
        } else {
            html! {}
        }
    }

    fn render_analyze(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="analyze-tab">
                { self.render_upload_card(ctx) }
                { self.render_results(ctx) }
            </div>
        }
    }

    fn render_upload_card(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let in_flight = self.submission.is_in_flight();

        let on_file_change = link.batch_callback(|e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let picked = input.files().as_ref().and_then(first_image_file);
            input.set_value("");
            picked.map(Msg::ImageSelected)
        });
        let on_drag_over = link.callback(|e: DragEvent| {
            e.prevent_default();
            Msg::SetDragOver(true)
        });
        let on_drag_leave = link.callback(|e: DragEvent| {
            e.prevent_default();
            Msg::SetDragOver(false)
        });
        let on_drop = link.callback(Msg::HandleDrop);

        html! {
            <div class="upload-card">
                <h2><i class="fa-solid fa-upload"></i>{" Upload Plant Image"}</h2>

                <div
                    class={classes!("drop-zone", self.drag_over.then_some("drag-over"))}
                    ondragover={on_drag_over}
                    ondragleave={on_drag_leave}
                    ondrop={on_drop}
                >
                    <input
                        type="file"
                        accept="image/*"
                        class="file-input-overlay"
                        onchange={on_file_change}
                    />
                    {
                        if let Some(selected) = &self.selected {
                            html! {
                                <div class="preview">
                                    <img src={selected.preview.to_string()} alt="Plant preview" />
                                    <button
                                        class="remove-btn"
                                        disabled={in_flight}
                                        onclick={link.callback(|e: MouseEvent| {
                                            e.stop_propagation();
                                            Msg::ResetForm
                                        })}
                                    >
                                        <i class="fa-solid fa-xmark"></i>
                                    </button>
                                    <p class="file-name">{ selected.file.name() }</p>
                                </div>
                            }
                        } else {
                            html! {
                                <div class="upload-placeholder">
                                    <i class="fa-solid fa-cloud-arrow-up"></i>
                                    <p>{"Drop image here or click to upload"}</p>
                                    <p class="file-types">{"Supports JPG, PNG, WebP"}</p>
                                </div>
                            }
                        }
                    }
                </div>

                <div class="button-row">
                    <button
                        class="analyze-btn"
                        disabled={self.selected.is_none() || in_flight}
                        onclick={link.callback(|_| Msg::Submit)}
                    >
                        {
                            if in_flight {
                                html! { <><i class="fa-solid fa-spinner fa-spin"></i>{" Analyzing..."}</> }
                            } else {
                                html! { <><i class="fa-solid fa-wand-magic-sparkles"></i>{" Start Analysis"}</> }
                            }
                        }
                    </button>
                    {
                        if self.selected.is_some() && !in_flight {
                            html! {
                                <button class="clear-btn" onclick={link.callback(|_| Msg::ResetForm)}>
                                    <i class="fa-solid fa-xmark"></i>{" Clear"}
                                </button>
                            }
                        } else {
                            html! {}
                        }
                    }
                </div>
            </div>
        }
    }

    fn render_results(&self, ctx: &Context<Self>) -> Html {
        let Some(outcome) = self.submission.outcome() else {
            return html! {};
        };

        let (class, icon, heading) = match &outcome.result {
            PredictionLabel::Infected => (
                "infected",
                "fa-triangle-exclamation",
                "Arsenic Toxicity Detected".to_string(),
            ),
            PredictionLabel::NotInfected => (
                "healthy",
                "fa-circle-check",
                "No Arsenic Detected – Healthy Plant".to_string(),
            ),
            PredictionLabel::Other(label) => ("unknown", "fa-circle-question", label.clone()),
        };

        html! {
            <div class={classes!("results-card", class)}>
                <h3><i class="fa-solid fa-flask"></i>{" Analysis Results"}</h3>
                <div class="verdict">
                    <i class={classes!("fa-solid", icon)}></i>
                    <div>
                        <h4>{ heading }</h4>
                        <p class="confidence">
                            { format!("Confidence: {}%", format_confidence(outcome.confidence)) }
                        </p>
                        {
                            if let Some(message) = &outcome.message {
                                html! { <p class="verdict-message">{ message }</p> }
                            } else {
                                html! {}
                            }
                        }
                    </div>
                </div>
                <button class="analyze-btn" onclick={ctx.link().callback(|_| Msg::ResetForm)}>
                    <i class="fa-solid fa-plus"></i>{" Analyze Another Plant"}
                </button>
            </div>
        }
    }

    fn render_history(&self) -> Html {
        html! {
            <div class="history-card">
                <h2><i class="fa-solid fa-clock-rotate-left"></i>{" Analysis History"}</h2>
                {
                    if self.history.is_empty() {
                        html! {
                            <div class="history-empty">
                                <i class="fa-solid fa-clock"></i>
                                <p>{"No analysis history yet"}</p>
                                <p class="hint">{"Your analyzed plants will appear here"}</p>
                            </div>
                        }
                    } else {
                        self.history
                            .iter()
                            .enumerate()
                            .map(|(index, record)| render_history_item(index, record))
                            .collect::<Html>()
                    }
                }
            </div>
        }
    }
}

fn render_history_item(index: usize, record: &PredictionRecord) -> Html {
    let key = record
        .id
        .as_ref()
        .map(|id| id.to_string())
        .unwrap_or_else(|| index.to_string());
    let (icon, title) = if record.result.is_infected() {
        ("fa-triangle-exclamation infected", "Arsenic Detected")
    } else {
        ("fa-circle-check healthy", "Healthy")
    };

    html! {
        <div class="history-item" key={key}>
            <div class="history-verdict">
                <i class={classes!("fa-solid", icon)}></i>
                <div>
                    <p class="history-title">{ title }</p>
                    <p class="history-file">
                        { record.image_path.as_deref().unwrap_or("Unknown file") }
                    </p>
                </div>
            </div>
            <div class="history-meta">
                <p class="history-date">{ format_timestamp(&record.created_at) }</p>
                <p class="history-confidence">
                    { format!("{}%", format_confidence(record.confidence)) }
                </p>
            </div>
        </div>
    }
}

fn render_tips() -> Html {
    let tips = [
        "Clear, bright lighting",
        "Focus on leaves",
        "Avoid shadows",
        "Close-up shots work best",
    ];

    html! {
        <aside class="tips-card">
            <h3><i class="fa-solid fa-wand-magic-sparkles"></i>{" Pro Tips"}</h3>
            <ul>
                { for tips.iter().map(|tip| html! {
                    <li><i class="fa-solid fa-shield-halved"></i>{ *tip }</li>
                }) }
            </ul>
        </aside>
    }
}
