//! Integration tests for [`relay_bot::HandlerChain`] and [`relay_bot::UpdateDispatcher`].
//!
//! Covers: before/after order, before stopping the chain, Stop ending the handle phase and reaching
//! after, and the default dispatcher chain syncing users and relaying messages.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use relay_bot::{format, Handler, HandlerChain, HandlerResponse, Message, Update, UpdateDispatcher};
use storage::MessageStore;

mod common;
use common::{button_press, temp_repo, text_message, FailingStore, MockBot, Outbound};

/// **Test: before and after run once; handle runs once.**
#[tokio::test]
async fn test_handler_chain_with_handler() {
    let before_count = Arc::new(AtomicUsize::new(0));
    let after_count = Arc::new(AtomicUsize::new(0));
    let handle_count = Arc::new(AtomicUsize::new(0));

    let chain = HandlerChain::new()
        .add_handler(Arc::new(TestBeforeAfterHandler::new(
            before_count.clone(),
            after_count.clone(),
        )))
        .add_handler(Arc::new(TestHandler::new(handle_count.clone())));

    let result = chain.handle(&text_message(1, "test")).await.unwrap();

    assert_eq!(result, HandlerResponse::Continue);
    assert_eq!(before_count.load(Ordering::SeqCst), 1);
    assert_eq!(handle_count.load(Ordering::SeqCst), 1);
    assert_eq!(after_count.load(Ordering::SeqCst), 1);
}

/// **Test: before returning false stops the chain; handle is not run.**
#[tokio::test]
async fn test_handler_stops_chain() {
    struct BlockingHandler;

    #[async_trait::async_trait]
    impl Handler for BlockingHandler {
        async fn before(&self, _message: &Message) -> relay_bot::Result<bool> {
            Ok(false)
        }
    }

    let handle_count = Arc::new(AtomicUsize::new(0));
    let chain = HandlerChain::new()
        .add_handler(Arc::new(BlockingHandler))
        .add_handler(Arc::new(TestHandler::new(handle_count.clone())));

    let result = chain.handle(&text_message(1, "test")).await.unwrap();

    assert_eq!(result, HandlerResponse::Stop);
    assert_eq!(handle_count.load(Ordering::SeqCst), 0);
}

/// **Test: Stop ends the handle phase and is what after sees.**
#[tokio::test]
async fn test_stop_skips_later_handlers_and_reaches_after() {
    struct StopHandler;

    #[async_trait::async_trait]
    impl Handler for StopHandler {
        async fn handle(&self, _message: &Message) -> relay_bot::Result<HandlerResponse> {
            Ok(HandlerResponse::Stop)
        }
    }

    struct CaptureResponseHandler {
        seen: Arc<Mutex<Vec<HandlerResponse>>>,
    }

    #[async_trait::async_trait]
    impl Handler for CaptureResponseHandler {
        async fn after(
            &self,
            _message: &Message,
            response: &HandlerResponse,
        ) -> relay_bot::Result<()> {
            self.seen.lock().unwrap().push(*response);
            Ok(())
        }
    }

    let seen = Arc::new(Mutex::new(Vec::new()));
    let handle_count = Arc::new(AtomicUsize::new(0));
    let chain = HandlerChain::new()
        .add_handler(Arc::new(CaptureResponseHandler { seen: seen.clone() }))
        .add_handler(Arc::new(StopHandler))
        .add_handler(Arc::new(TestHandler::new(handle_count.clone())));

    let result = chain.handle(&text_message(1, "test")).await.unwrap();

    assert_eq!(result, HandlerResponse::Stop);
    assert_eq!(handle_count.load(Ordering::SeqCst), 0);
    assert_eq!(*seen.lock().unwrap(), vec![HandlerResponse::Stop]);
}

/// **Test: before runs first→last, after runs last→first.**
#[tokio::test]
async fn test_multiple_handlers_executed_in_order() {
    let order = Arc::new(Mutex::new(Vec::new()));

    struct OrderHandler {
        name: &'static str,
        order: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait::async_trait]
    impl Handler for OrderHandler {
        async fn before(&self, _message: &Message) -> relay_bot::Result<bool> {
            self.order.lock().unwrap().push(format!("before_{}", self.name));
            Ok(true)
        }

        async fn after(
            &self,
            _message: &Message,
            _response: &HandlerResponse,
        ) -> relay_bot::Result<()> {
            self.order.lock().unwrap().push(format!("after_{}", self.name));
            Ok(())
        }
    }

    let chain = HandlerChain::new()
        .add_handler(Arc::new(OrderHandler {
            name: "first",
            order: order.clone(),
        }))
        .add_handler(Arc::new(OrderHandler {
            name: "second",
            order: order.clone(),
        }));

    chain.handle(&text_message(1, "test")).await.unwrap();

    assert_eq!(
        *order.lock().unwrap(),
        vec!["before_first", "before_second", "after_second", "after_first"]
    );
}

/// **Test: the default dispatcher stores the sender and the message, then acknowledges.**
#[tokio::test]
async fn test_dispatcher_syncs_user_and_relays_message() {
    let (_dir, repo) = temp_repo().await;
    let bot = MockBot::new();
    let dispatcher = UpdateDispatcher::new(repo.clone(), bot.clone());

    dispatcher
        .dispatch(&Update::Message(text_message(5, "remember this")))
        .await;

    let user = repo.get_user(42).await.unwrap().unwrap();
    assert_eq!(user.first_name, "Alice");
    assert_eq!(user.username.as_deref(), Some("alice"));
    assert_eq!(repo.count(5).await.unwrap(), 1);
    assert_eq!(bot.texts(), vec![format::saved_ack("remember this")]);
}

/// **Test: button presses go to the callback handler.**
#[tokio::test]
async fn test_dispatcher_routes_button_press() {
    let (_dir, repo) = temp_repo().await;
    repo.save_message(5, 42, "one").await.unwrap();
    let bot = MockBot::new();
    let dispatcher = UpdateDispatcher::new(repo.clone(), bot.clone());

    dispatcher
        .dispatch(&Update::ButtonPress(button_press(5, "clear_confirm")))
        .await;

    assert_eq!(repo.count(5).await.unwrap(), 0);
    assert!(bot.calls().contains(&Outbound::Text {
        chat_id: 5,
        text: format::cleared_text()
    }));
}

/// **Test: a failing user sync does not block the relay; the failure notice still goes out.**
#[tokio::test]
async fn test_dispatcher_with_failing_store() {
    let bot = MockBot::new();
    let dispatcher = UpdateDispatcher::new(Arc::new(FailingStore), bot.clone());

    dispatcher
        .dispatch(&Update::Message(text_message(5, "hello")))
        .await;

    assert_eq!(
        bot.texts(),
        vec![format::failure_text("saving the message")]
    );
}

// --- Helpers used by tests ---

struct TestBeforeAfterHandler {
    before_count: Arc<AtomicUsize>,
    after_count: Arc<AtomicUsize>,
}

impl TestBeforeAfterHandler {
    fn new(before_count: Arc<AtomicUsize>, after_count: Arc<AtomicUsize>) -> Self {
        Self {
            before_count,
            after_count,
        }
    }
}

#[async_trait::async_trait]
impl Handler for TestBeforeAfterHandler {
    async fn before(&self, _message: &Message) -> relay_bot::Result<bool> {
        self.before_count.fetch_add(1, Ordering::SeqCst);
        Ok(true)
    }

    async fn after(&self, _message: &Message, _response: &HandlerResponse) -> relay_bot::Result<()> {
        self.after_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

struct TestHandler {
    handle_count: Arc<AtomicUsize>,
}

impl TestHandler {
    fn new(handle_count: Arc<AtomicUsize>) -> Self {
        Self { handle_count }
    }
}

#[async_trait::async_trait]
impl Handler for TestHandler {
    async fn handle(&self, _message: &Message) -> relay_bot::Result<HandlerResponse> {
        self.handle_count.fetch_add(1, Ordering::SeqCst);
        Ok(HandlerResponse::Continue)
    }
}
