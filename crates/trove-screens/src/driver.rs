//! Runs screen commands against the store API.

use std::collections::VecDeque;
use std::sync::Arc;

use trove_commerce::{Endpoint, RemoveOutcome, StoreClient};
use trove_observability::{ClientLogger, Stopwatch};

use crate::cart::{CartMsg, CartScreen};
use crate::catalog::{CatalogMsg, CatalogScreen};
use crate::command::{Command, Navigation, Outcome};
use crate::detail::{DetailMsg, DetailScreen};
use crate::nav::{NavStack, Route, Screen};

/// A user event addressed to a screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Catalog(CatalogMsg),
    Cart(CartMsg),
    Detail(DetailMsg),
    Back,
}

impl Event {
    /// The message that closes the dialog on the screen at `route`.
    pub fn dismiss_notice(route: Route) -> Self {
        match route {
            Route::TechnoTrove => Event::Catalog(CatalogMsg::DismissNotice),
            Route::Cart => Event::Cart(CartMsg::DismissNotice),
            Route::ProductDescriptionPage => Event::Detail(DetailMsg::DismissNotice),
        }
    }
}

type CacheBust = Arc<dyn Fn() -> String + Send + Sync>;

/// What [`Storefront::step`] made of a command.
#[derive(Debug)]
pub enum Step {
    /// Handled in place (navigation); these commands follow.
    Done(Vec<Command>),
    /// A store call to await, then hand to [`Storefront::complete`].
    Request(Request),
}

/// The network half of a command, detached from the storefront.
///
/// Awaiting [`Request::send`] borrows nothing from the screens, so a front
/// end can show optimistic state and keep handling input meanwhile.
#[derive(Debug)]
pub struct Request {
    client: StoreClient,
    endpoint: Endpoint,
    /// Only meaningful for list fetches.
    ticket: u64,
    started: Option<Stopwatch>,
}

impl Request {
    pub fn endpoint(&self) -> Endpoint {
        self.endpoint
    }

    pub async fn send(self) -> Reply {
        let Request {
            client,
            endpoint,
            ticket,
            started,
        } = self;
        let outcome = match endpoint {
            Endpoint::Products(category) => Outcome::Products {
                ticket,
                result: client.list_products(category).await,
            },
            Endpoint::Cart => Outcome::Cart(client.cart().await),
            Endpoint::Product(sku) => Outcome::Product {
                sku,
                result: client.resolved_product(sku).await,
            },
            Endpoint::AddToCart(sku) => Outcome::AddedToCart {
                sku,
                result: client.add_to_cart(sku).await,
            },
            Endpoint::RemoveFromCart(sku) => Outcome::RemovedFromCart {
                sku,
                result: client.remove_from_cart(sku).await,
            },
            Endpoint::Favorite(sku) => Outcome::Favorite {
                sku,
                result: client.toggle_favorite(sku).await,
            },
        };
        Reply {
            endpoint,
            outcome,
            started,
        }
    }
}

/// A finished [`Request`].
#[derive(Debug)]
pub struct Reply {
    endpoint: Endpoint,
    outcome: Outcome,
    started: Option<Stopwatch>,
}

impl Reply {
    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }
}

/// The storefront session: a navigation stack plus the client that serves it.
///
/// An event is handled in two halves. [`Storefront::apply`] updates the
/// current screen at once and returns the commands it asked for; running
/// them ([`Storefront::run`], or [`Storefront::step`] and
/// [`Storefront::complete`] one at a time) performs the requests and feeds
/// each outcome to whichever screen is current when it arrives.
pub struct Storefront {
    client: StoreClient,
    nav: NavStack,
    logger: ClientLogger,
    cache_bust: CacheBust,
}

impl std::fmt::Debug for Storefront {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storefront")
            .field("client", &self.client)
            .field("nav", &self.nav)
            .finish_non_exhaustive()
    }
}

impl Storefront {
    pub fn new(client: StoreClient) -> Self {
        let root = CatalogScreen::new(client.config().clone());
        Self {
            client,
            nav: NavStack::new(root),
            logger: ClientLogger::disabled(),
            cache_bust: Arc::new(epoch_millis),
        }
    }

    pub fn with_logger(mut self, logger: ClientLogger) -> Self {
        self.logger = logger;
        self
    }

    /// Source of the `cache_bust` token given to each new detail screen.
    pub fn with_cache_bust(mut self, f: impl Fn() -> String + Send + Sync + 'static) -> Self {
        self.cache_bust = Arc::new(f);
        self
    }

    /// Commands that mount the catalog.
    pub fn mount(&mut self) -> Vec<Command> {
        self.log().info("storefront started").emit();
        self.nav.start()
    }

    /// Mount the catalog and wait for its first fetch.
    pub async fn start(&mut self) {
        let commands = self.mount();
        self.run(commands).await;
    }

    /// Deliver `event` to the current screen without running anything.
    ///
    /// Returns `None` when the event does not belong to the current screen
    /// (or is `Back` at the root).
    pub fn apply(&mut self, event: Event) -> Option<Vec<Command>> {
        if event == Event::Back {
            return self.nav.back();
        }
        let handled = match (event, self.nav.current_mut()) {
            (Event::Catalog(msg), Screen::Catalog(screen)) => Ok(screen.update(msg)),
            (Event::Cart(msg), Screen::Cart(screen)) => Ok(screen.update(msg)),
            (Event::Detail(msg), Screen::Detail(screen)) => Ok(screen.update(msg)),
            (event, _) => Err(event),
        };
        match handled {
            Ok(commands) => Some(commands),
            Err(event) => {
                self.log()
                    .debug("event ignored")
                    .field("event", format!("{event:?}"))
                    .emit();
                None
            }
        }
    }

    /// [`apply`](Self::apply) then [`run`](Self::run). `false` if ignored.
    pub async fn dispatch(&mut self, event: Event) -> bool {
        match self.apply(event) {
            Some(commands) => {
                self.run(commands).await;
                true
            }
            None => false,
        }
    }

    /// Pop to the previous screen. `false` at the root.
    pub async fn back(&mut self) -> bool {
        self.dispatch(Event::Back).await
    }

    /// Run `commands` and everything they lead to, in order.
    pub async fn run(&mut self, commands: Vec<Command>) {
        let mut queue: VecDeque<Command> = commands.into();
        while let Some(command) = queue.pop_front() {
            let follow_up = match self.step(command) {
                Step::Done(commands) => commands,
                Step::Request(request) => {
                    let reply = request.send().await;
                    self.complete(reply)
                }
            };
            queue.extend(follow_up);
        }
    }

    /// Apply a navigation now, or hand back the request a command needs.
    pub fn step(&mut self, command: Command) -> Step {
        let (endpoint, ticket) = match command {
            Command::Navigate(navigation) => return Step::Done(self.navigate(navigation)),
            Command::FetchProducts { category, ticket } => (Endpoint::Products(category), ticket),
            other => match other.endpoint() {
                Some(endpoint) => (endpoint, 0),
                None => return Step::Done(Vec::new()),
            },
        };
        Step::Request(Request {
            client: self.client.clone(),
            endpoint,
            ticket,
            started: Stopwatch::start(),
        })
    }

    /// Log a finished request and deliver its outcome to the current screen.
    pub fn complete(&mut self, reply: Reply) -> Vec<Command> {
        let Reply {
            endpoint,
            outcome,
            started,
        } = reply;
        let endpoint = self.client.describe(&endpoint);
        let log = self.log();
        match outcome.error() {
            Some(err) => log
                .error("request failed")
                .field("endpoint", endpoint.as_str())
                .field("kind", err.kind().as_str())
                .field("error", err.to_string())
                .field("transient", err.is_transient())
                .emit(),
            None => log
                .debug("request completed")
                .field("endpoint", endpoint.as_str())
                .elapsed_ms("duration_ms", started)
                .emit(),
        }
        if let Outcome::RemovedFromCart {
            sku,
            result: Ok(RemoveOutcome::Other(message)),
        } = &outcome
        {
            log.warn("unexpected remove response")
                .field("sku", sku.to_string())
                .field("message", message.as_str())
                .emit();
        }

        self.nav.current_mut().on_outcome(outcome)
    }

    fn navigate(&mut self, navigation: Navigation) -> Vec<Command> {
        let config = self.client.config().clone();
        let commands = match navigation {
            Navigation::OpenCart => self.nav.push(Screen::Cart(CartScreen::new(config))),
            Navigation::OpenProduct(product) => {
                let screen = DetailScreen::new(*product, config, (self.cache_bust)());
                self.nav.push(Screen::Detail(Box::new(screen)))
            }
            Navigation::Back => self.nav.back().unwrap_or_default(),
        };
        self.log()
            .info("navigated")
            .field("route", self.nav.route().name())
            .field("depth", self.nav.depth())
            .emit();
        commands
    }

    fn log(&self) -> ClientLogger {
        self.logger.for_screen(self.nav.route().name())
    }

    pub fn client(&self) -> &StoreClient {
        &self.client
    }

    pub fn nav(&self) -> &NavStack {
        &self.nav
    }

    pub fn route(&self) -> Route {
        self.nav.route()
    }

    pub fn current(&self) -> &Screen {
        self.nav.current()
    }

    /// The current screen, if it is the catalog.
    pub fn catalog(&self) -> Option<&CatalogScreen> {
        match self.nav.current() {
            Screen::Catalog(screen) => Some(screen),
            _ => None,
        }
    }

    pub fn cart(&self) -> Option<&CartScreen> {
        match self.nav.current() {
            Screen::Cart(screen) => Some(screen),
            _ => None,
        }
    }

    pub fn detail(&self) -> Option<&DetailScreen> {
        match self.nav.current() {
            Screen::Detail(screen) => Some(screen),
            _ => None,
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn epoch_millis() -> String {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis()
        .to_string()
}

// `SystemTime::now` panics on wasm32-unknown-unknown; the web front end
// supplies its own token through `with_cache_bust`.
#[cfg(target_arch = "wasm32")]
fn epoch_millis() -> String {
    use std::sync::atomic::{AtomicU64, Ordering};
    static NEXT: AtomicU64 = AtomicU64::new(1);
    NEXT.fetch_add(1, Ordering::Relaxed).to_string()
}
