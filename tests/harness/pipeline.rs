use std::sync::Arc;
use std::time::Duration;

use tokenwatch::application::price::{PriceFetcher, TokenCache};
use tokenwatch::application::scheduler::AlertScheduler;
use tokenwatch::port::AlertStore;
use tokenwatch::testkit::dispatcher::RecordingDispatcher;
use tokenwatch::testkit::upstream::{ScriptedExchange, ScriptedPrices};

pub const TOKEN_LIFETIME: Duration = Duration::from_secs(86_400);
pub const SAFETY_MARGIN: Duration = Duration::from_secs(300);

/// A scheduler wired to scripted upstream fakes and a recording dispatcher.
pub struct Pipeline {
    pub exchange: Arc<ScriptedExchange>,
    pub prices: Arc<ScriptedPrices>,
    pub dispatcher: RecordingDispatcher,
    pub scheduler: AlertScheduler,
}

impl Pipeline {
    pub fn new(store: Arc<dyn AlertStore>) -> Self {
        Self::with_dispatcher(store, RecordingDispatcher::new())
    }

    pub fn with_dispatcher(store: Arc<dyn AlertStore>, dispatcher: RecordingDispatcher) -> Self {
        let exchange = Arc::new(ScriptedExchange::with_lifetime(TOKEN_LIFETIME));
        let prices = Arc::new(ScriptedPrices::new());
        let tokens = Arc::new(TokenCache::new(exchange.clone(), SAFETY_MARGIN));
        let fetcher = Arc::new(PriceFetcher::new(tokens, prices.clone()));
        let scheduler = AlertScheduler::new(
            store,
            fetcher,
            Arc::new(dispatcher.clone()),
            Duration::from_secs(300),
        );

        Self {
            exchange,
            prices,
            dispatcher,
            scheduler,
        }
    }
}
