//! # Shell
//!
//! Owns every state holder and runs the read-command-render loop.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │   print frame ──► read line ──► parse ──► execute ──► sync form ──┐    │
//! │        ▲                                                           │    │
//! │        └───────────── drain catalog events, re-fetch ◄─────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Commands run one at a time on the current-thread runtime. The only
//! background work is a confirmed deletion, which the loop never waits for;
//! its result arrives as a catalog event before a later render.

use std::io::Write;
use std::sync::Arc;

use shopsphere_api::StorefrontApi;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::commands::{self, Command, Outcome};
use crate::error::AppResult;
use crate::render::FrameView;
use crate::state::{
    AppConfig, AuthSession, CartSession, ProductCatalog, ProductForm, Screen, ViewCoordinator,
};

pub struct Shell {
    pub(crate) config: AppConfig,
    pub(crate) api: Arc<dyn StorefrontApi>,
    pub(crate) auth: AuthSession,
    pub(crate) cart: CartSession,
    pub(crate) view: ViewCoordinator,
    pub(crate) catalog: ProductCatalog,
    pub(crate) form: Option<ProductForm>,
    pub(crate) pending: Vec<JoinHandle<()>>,
}

impl Shell {
    /// Wires the holders together. The session stays loading until
    /// [`Shell::start`].
    pub fn new(config: AppConfig, api: Arc<dyn StorefrontApi>) -> Self {
        let auth = AuthSession::new();
        let cart = CartSession::new();
        let view = ViewCoordinator::new(auth.clone(), cart.clone(), Arc::clone(&api));
        let catalog = ProductCatalog::new(view.subscribe_catalog());

        Shell {
            config,
            api,
            auth,
            cart,
            view,
            catalog,
            form: None,
            pending: Vec::new(),
        }
    }

    /// The startup session check.
    pub async fn start(&mut self) {
        let token = self.config.session_token.clone();
        self.auth.initialize(self.api.as_ref(), token).await;
    }

    /// Parses and runs one line.
    pub async fn handle_line(&mut self, line: &str) -> AppResult<Outcome> {
        let command: Command = line.parse()?;
        debug!(?command, "Executing command");
        self.execute(command).await
    }

    pub async fn execute(&mut self, command: Command) -> AppResult<Outcome> {
        let outcome = commands::execute(self, command).await;
        self.sync_form();
        outcome
    }

    /// Renders the current frame, re-fetching the catalog if needed.
    pub async fn render(&mut self) -> String {
        let frame = self.view.render();

        if frame.screen == Screen::Products {
            if let Err(e) = self.catalog.ensure_fresh(self.api.as_ref()).await {
                warn!(error = %e, "Could not load products");
            }
        } else {
            self.catalog.sync_events();
        }

        let session = self.auth.snapshot();
        let cart = self.cart.snapshot();
        let notice = self.catalog.take_notice();

        FrameView {
            frame: &frame,
            config: &self.config,
            session: &session,
            cart_quantity: cart.total_quantity,
            catalog: &self.catalog,
            form: self.form.as_ref(),
            notice: notice.as_deref(),
        }
        .to_string()
    }

    /// Waits for background deletions to finish.
    pub async fn settle(&mut self) {
        for task in self.pending.drain(..) {
            if let Err(e) = task.await {
                warn!(error = %e, "Background task failed");
            }
        }
    }

    /// Reads commands from `input` until `quit` or end of input, writing
    /// frames and messages to `out`.
    pub async fn run<R, W>(&mut self, input: R, out: &mut W) -> std::io::Result<()>
    where
        R: AsyncRead + Unpin,
        W: Write,
    {
        let mut lines = BufReader::new(input).lines();
        writeln!(out, "{}", self.render().await)?;

        loop {
            write!(out, "> ")?;
            out.flush()?;

            let Some(line) = lines.next_line().await? else {
                writeln!(out)?;
                break;
            };
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            match self.handle_line(line).await {
                Ok(Outcome::Quit) => break,
                Ok(Outcome::Continue(Some(message))) => writeln!(out, "{}", message)?,
                Ok(Outcome::Continue(None)) => {}
                Err(e) => writeln!(out, "error: {}", e.message)?,
            }

            writeln!(out, "{}", self.render().await)?;
        }

        self.settle().await;
        Ok(())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn view(&self) -> &ViewCoordinator {
        &self.view
    }

    pub fn auth(&self) -> &AuthSession {
        &self.auth
    }

    pub fn cart(&self) -> &CartSession {
        &self.cart
    }

    pub fn catalog(&self) -> &ProductCatalog {
        &self.catalog
    }

    pub fn form(&self) -> Option<&ProductForm> {
        self.form.as_ref()
    }

    /// Keeps the admin form in step with the coordinator: one form per edit
    /// target, none off the admin screen.
    fn sync_form(&mut self) {
        match self.view.render().screen {
            Screen::Admin { editing } => {
                let target = editing.as_ref().map(|p| p.id);
                let stale = self.form.as_ref().map_or(true, |f| f.editing_id() != target);
                if stale {
                    self.form = Some(ProductForm::for_target(editing.as_ref()));
                }
            }
            _ => self.form = None,
        }
    }
}
