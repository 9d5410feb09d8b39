//! Email gate in front of ticket links.
//!
//! Visitors who have not subscribed yet are asked for an email address (and,
//! when [`Verification::Otp`] is configured, a one-time passcode) before they
//! are sent to a ticket page. [`GateFlow`] is the synchronous state machine,
//! [`TicketGate`] drives it against the events service and the browser.

use std::cell::RefCell;
use std::rc::Rc;

use payloads::{APIClient, ClientError, requests};

use crate::subscription::SubscriptionStore;

const SUBSCRIBED_MESSAGE: &str = "Thank you for subscribing!";
const OTP_SENT_MESSAGE: &str = "We sent a one-time code to your email.";
const EMPTY_EMAIL_MESSAGE: &str = "Please enter your email";
const EMPTY_OTP_MESSAGE: &str = "Please enter the code from your email";

/// How a visitor proves their email before getting tickets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verification {
    /// Submit the address and trust it.
    #[default]
    Direct,
    /// Email a passcode and require it back.
    Otp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormStatus {
    #[default]
    Idle,
    Pending,
    Success,
    Error,
}

/// Transient state of one email form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormSession {
    pub email: String,
    pub otp: String,
    pub status: FormStatus,
    pub message: Option<String>,
}

impl FormSession {
    pub fn is_pending(&self) -> bool {
        self.status == FormStatus::Pending
    }

    pub fn begin(&mut self) {
        self.status = FormStatus::Pending;
        self.message = None;
    }

    pub fn succeed(&mut self, message: impl Into<String>) {
        self.status = FormStatus::Success;
        self.message = Some(message.into());
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.status = FormStatus::Error;
        self.message = Some(message.into());
    }

    /// Record a failed request, preferring the reason the service gave.
    pub fn fail_with(&mut self, error: &ClientError, fallback: &str) {
        tracing::debug!("Request failed: {error}");
        self.fail(error.detail().unwrap_or_else(|| fallback.to_string()));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GatePhase {
    #[default]
    Closed,
    CollectingEmail,
    Submitting,
    SendingOtp,
    AwaitingOtp,
    VerifyingOtp,
    Done,
}

impl GatePhase {
    pub fn is_open(self) -> bool {
        !matches!(self, GatePhase::Closed)
    }

    /// Whether the OTP input should be shown.
    pub fn wants_otp(self) -> bool {
        matches!(self, GatePhase::AwaitingOtp | GatePhase::VerifyingOtp)
    }
}

/// A remote call issued by the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateRequest {
    SubmitEmail(requests::SubmitEmail),
    SendOtp(requests::SendOtp),
    VerifyOtp(requests::VerifyOtp),
}

impl GateRequest {
    /// Message shown when the service gives no reason of its own.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            GateRequest::SubmitEmail(_) => {
                "Failed to submit email. Please try again."
            }
            GateRequest::SendOtp(_) => "Failed to send OTP. Please try again.",
            GateRequest::VerifyOtp(_) => "Invalid OTP",
        }
    }
}

/// A request handed out by [`GateFlow::submit`], to be passed back to
/// [`GateFlow::resolve`] together with its result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest {
    generation: u64,
    pub request: GateRequest,
}

/// What happened when a response came back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The flow was closed or reopened since the request was sent.
    Stale,
    /// The flow moved on and keeps the modal open.
    Updated,
    /// The visitor is now subscribed and should be sent to `target`.
    Subscribed { email: String, target: String },
}

/// Gate state machine for one modal.
///
/// Every [`open`](Self::open) and [`close`](Self::close) starts a new
/// generation. Responses to requests from an earlier generation are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GateFlow {
    verification: Verification,
    phase: GatePhase,
    session: FormSession,
    target: Option<String>,
    generation: u64,
}

impl GateFlow {
    pub fn new(verification: Verification) -> Self {
        Self {
            verification,
            ..Self::default()
        }
    }

    pub fn verification(&self) -> Verification {
        self.verification
    }

    pub fn phase(&self) -> GatePhase {
        self.phase
    }

    pub fn session(&self) -> &FormSession {
        &self.session
    }

    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    pub fn is_open(&self) -> bool {
        self.phase.is_open()
    }

    /// The current generation, for a later [`finish`](Self::finish).
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Close a completed flow ahead of its redirect.
    ///
    /// Returns `false`, leaving the flow untouched, when the visitor closed
    /// or reopened the modal after `generation` completed.
    pub fn finish(&mut self, generation: u64) -> bool {
        if generation != self.generation || self.phase != GatePhase::Done {
            return false;
        }
        self.close();
        true
    }

    /// Show the form for a new ticket link, discarding anything left over
    /// from a previous attempt.
    pub fn open(&mut self, target: impl Into<String>) {
        self.generation += 1;
        self.session = FormSession::default();
        self.target = Some(target.into());
        self.phase = GatePhase::CollectingEmail;
    }

    pub fn close(&mut self) {
        self.generation += 1;
        self.session = FormSession::default();
        self.target = None;
        self.phase = GatePhase::Closed;
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        if self.phase == GatePhase::CollectingEmail {
            self.session.email = email.into();
        }
    }

    pub fn set_otp(&mut self, otp: impl Into<String>) {
        if self.phase == GatePhase::AwaitingOtp {
            self.session.otp = otp.into();
        }
    }

    /// Go back from passcode entry to the email field.
    pub fn change_email(&mut self) {
        if self.phase == GatePhase::AwaitingOtp {
            self.session.otp.clear();
            self.session.status = FormStatus::Idle;
            self.session.message = None;
            self.phase = GatePhase::CollectingEmail;
        }
    }

    /// Submit whatever the current phase collects.
    ///
    /// Returns `None` when there is nothing to send: the input is empty (the
    /// session then carries a message), a request is already in flight, or
    /// the modal is not collecting anything.
    pub fn submit(&mut self) -> Option<PendingRequest> {
        let request = match self.phase {
            GatePhase::CollectingEmail => {
                let email = self.session.email.trim().to_string();
                if email.is_empty() {
                    self.session.fail(EMPTY_EMAIL_MESSAGE);
                    return None;
                }
                self.session.email = email.clone();
                match self.verification {
                    Verification::Direct => {
                        self.phase = GatePhase::Submitting;
                        GateRequest::SubmitEmail(requests::SubmitEmail {
                            email,
                        })
                    }
                    Verification::Otp => {
                        self.phase = GatePhase::SendingOtp;
                        GateRequest::SendOtp(requests::SendOtp { email })
                    }
                }
            }
            GatePhase::AwaitingOtp => {
                let otp = self.session.otp.trim().to_string();
                if otp.is_empty() {
                    self.session.fail(EMPTY_OTP_MESSAGE);
                    return None;
                }
                self.session.otp = otp.clone();
                self.phase = GatePhase::VerifyingOtp;
                GateRequest::VerifyOtp(requests::VerifyOtp {
                    email: self.session.email.clone(),
                    otp,
                })
            }
            _ => return None,
        };

        self.session.begin();
        Some(PendingRequest {
            generation: self.generation,
            request,
        })
    }

    /// Apply the outcome of a request returned by [`submit`](Self::submit).
    pub fn resolve(
        &mut self,
        pending: PendingRequest,
        result: Result<(), ClientError>,
    ) -> Resolution {
        if pending.generation != self.generation {
            tracing::debug!("Dropping response for an abandoned form");
            return Resolution::Stale;
        }

        match (&pending.request, result) {
            (GateRequest::SendOtp(_), Ok(())) => {
                self.phase = GatePhase::AwaitingOtp;
                self.session.succeed(OTP_SENT_MESSAGE);
                Resolution::Updated
            }
            (
                GateRequest::SubmitEmail(requests::SubmitEmail { email })
                | GateRequest::VerifyOtp(requests::VerifyOtp { email, .. }),
                Ok(()),
            ) => {
                self.phase = GatePhase::Done;
                self.session.succeed(SUBSCRIBED_MESSAGE);
                match self.target.clone() {
                    Some(target) => Resolution::Subscribed {
                        email: email.clone(),
                        target,
                    },
                    None => Resolution::Updated,
                }
            }
            (request, Err(error)) => {
                self.phase = match request {
                    GateRequest::VerifyOtp(_) => GatePhase::AwaitingOtp,
                    _ => GatePhase::CollectingEmail,
                };
                self.session.fail_with(&error, request.fallback_message());
                Resolution::Updated
            }
        }
    }
}

/// The remote operations the gate needs.
#[allow(async_fn_in_trait)]
pub trait GateApi {
    async fn send(&self, request: &GateRequest) -> Result<(), ClientError>;
}

impl GateApi for APIClient {
    async fn send(&self, request: &GateRequest) -> Result<(), ClientError> {
        match request {
            GateRequest::SubmitEmail(details) => self.submit_email(details).await,
            GateRequest::SendOtp(details) => self.send_otp(details).await,
            GateRequest::VerifyOtp(details) => self.verify_otp(details).await,
        }
    }
}

/// Sends the visitor somewhere else.
pub trait Navigate {
    fn redirect(&self, url: &str);
}

/// Redirects the current tab.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserNavigator;

impl Navigate for BrowserNavigator {
    fn redirect(&self, url: &str) {
        let Some(window) = web_sys::window() else {
            tracing::error!("No window to redirect to {url}");
            return;
        };
        if let Err(e) = window.location().assign(url) {
            tracing::error!("Redirect to {url} failed: {e:?}");
        }
    }
}

/// Async driver tying a [`GateFlow`] to the subscription store, the events
/// service and the browser location.
///
/// Clones share the same flow.
pub struct TicketGate<A, N> {
    flow: Rc<RefCell<GateFlow>>,
    store: SubscriptionStore,
    api: Rc<A>,
    navigator: Rc<N>,
    redirect_delay_ms: u32,
    on_change: Rc<dyn Fn()>,
}

impl<A, N> Clone for TicketGate<A, N> {
    fn clone(&self) -> Self {
        Self {
            flow: self.flow.clone(),
            store: self.store.clone(),
            api: self.api.clone(),
            navigator: self.navigator.clone(),
            redirect_delay_ms: self.redirect_delay_ms,
            on_change: self.on_change.clone(),
        }
    }
}

impl<A, N> PartialEq for TicketGate<A, N> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.flow, &other.flow)
    }
}

impl<A: GateApi, N: Navigate> TicketGate<A, N> {
    pub fn new(
        verification: Verification,
        store: SubscriptionStore,
        api: A,
        navigator: N,
    ) -> Self {
        Self {
            flow: Rc::new(RefCell::new(GateFlow::new(verification))),
            store,
            api: Rc::new(api),
            navigator: Rc::new(navigator),
            redirect_delay_ms: 0,
            on_change: Rc::new(|| ()),
        }
    }

    /// Keep the success message up this long before redirecting.
    pub fn with_redirect_delay(mut self, redirect_delay_ms: u32) -> Self {
        self.redirect_delay_ms = redirect_delay_ms;
        self
    }

    /// Called after every change to the flow, e.g. to re-render.
    pub fn on_change(mut self, on_change: impl Fn() + 'static) -> Self {
        self.on_change = Rc::new(on_change);
        self
    }

    /// A copy of the current flow state for rendering.
    pub fn snapshot(&self) -> GateFlow {
        self.flow.borrow().clone()
    }

    /// Entry point for a "Get Tickets" click.
    pub fn request_tickets(&self, target: &str) {
        if self.store.is_subscribed() {
            tracing::debug!("Subscribed visitor, redirecting to {target}");
            self.navigator.redirect(target);
            return;
        }
        self.update(|flow| flow.open(target));
    }

    pub fn close(&self) {
        self.update(GateFlow::close);
    }

    pub fn set_email(&self, email: String) {
        self.update(|flow| flow.set_email(email));
    }

    pub fn set_otp(&self, otp: String) {
        self.update(|flow| flow.set_otp(otp));
    }

    pub fn change_email(&self) {
        self.update(GateFlow::change_email);
    }

    /// Submit the current form and, once the visitor is subscribed, persist
    /// the email and redirect.
    pub async fn submit(&self) {
        let Some(pending) = self.update(GateFlow::submit) else {
            return;
        };

        let result = self.api.send(&pending.request).await;
        let resolution = self.update(|flow| flow.resolve(pending, result));

        if let Resolution::Subscribed { email, target } = resolution {
            let generation = self.flow.borrow().generation();
            self.store.set_subscriber(&email);
            if self.redirect_delay_ms > 0 {
                gloo_timers::future::TimeoutFuture::new(self.redirect_delay_ms)
                    .await;
            }
            if !self.update(|flow| flow.finish(generation)) {
                tracing::debug!("Modal closed before redirecting to {target}");
                return;
            }
            tracing::info!("Subscribed, redirecting to {target}");
            self.navigator.redirect(&target);
        }
    }

    fn update<T>(&self, change: impl FnOnce(&mut GateFlow) -> T) -> T {
        let result = change(&mut self.flow.borrow_mut());
        (self.on_change)();
        result
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::collections::VecDeque;

    use futures::channel::oneshot;
    use futures::executor::block_on;
    use reqwest::StatusCode;

    use super::*;
    use crate::subscription::{KeyValueStorage, MemoryStorage, SUBSCRIBER_KEY};

    fn rejected(detail: &str) -> ClientError {
        ClientError::APIError(
            StatusCode::BAD_REQUEST,
            format!(r#"{{"detail":"{detail}"}}"#),
        )
    }

    /// Answers requests from a queue and records them.
    #[derive(Default)]
    struct ScriptedApi {
        responses: RefCell<VecDeque<Result<(), ClientError>>>,
        calls: RefCell<Vec<GateRequest>>,
    }

    impl ScriptedApi {
        fn replying(
            responses: impl IntoIterator<Item = Result<(), ClientError>>,
        ) -> Self {
            Self {
                responses: RefCell::new(responses.into_iter().collect()),
                calls: RefCell::default(),
            }
        }
    }

    impl GateApi for Rc<ScriptedApi> {
        async fn send(&self, request: &GateRequest) -> Result<(), ClientError> {
            self.calls.borrow_mut().push(request.clone());
            self.responses
                .borrow_mut()
                .pop_front()
                .expect("unexpected request")
        }
    }

    /// Holds the response until the test releases it.
    struct DeferredApi {
        reply: RefCell<Option<oneshot::Receiver<Result<(), ClientError>>>>,
    }

    impl GateApi for DeferredApi {
        async fn send(&self, _: &GateRequest) -> Result<(), ClientError> {
            let reply = self.reply.borrow_mut().take().expect("one request");
            reply.await.expect("reply sent")
        }
    }

    #[derive(Default)]
    struct RecordingNavigator {
        visited: RefCell<Vec<String>>,
    }

    impl Navigate for Rc<RecordingNavigator> {
        fn redirect(&self, url: &str) {
            self.visited.borrow_mut().push(url.to_string());
        }
    }

    struct Harness {
        storage: MemoryStorage,
        api: Rc<ScriptedApi>,
        navigator: Rc<RecordingNavigator>,
        gate: TicketGate<Rc<ScriptedApi>, Rc<RecordingNavigator>>,
    }

    fn harness(
        verification: Verification,
        responses: impl IntoIterator<Item = Result<(), ClientError>>,
    ) -> Harness {
        let storage = MemoryStorage::new();
        let api = Rc::new(ScriptedApi::replying(responses));
        let navigator = Rc::new(RecordingNavigator::default());
        let gate = TicketGate::new(
            verification,
            SubscriptionStore::new(storage.clone()),
            api.clone(),
            navigator.clone(),
        );
        Harness {
            storage,
            api,
            navigator,
            gate,
        }
    }

    impl Harness {
        fn stored_email(&self) -> Option<String> {
            self.storage.get(SUBSCRIBER_KEY).unwrap()
        }

        fn visited(&self) -> Vec<String> {
            self.navigator.visited.borrow().clone()
        }
    }

    #[test]
    fn subscribed_visitor_is_redirected_without_modal() {
        let h = harness(Verification::Direct, []);
        h.storage.set(SUBSCRIBER_KEY, "a@b.com").unwrap();

        h.gate.request_tickets("https://tickets.example.com/1");

        assert_eq!(h.visited(), vec!["https://tickets.example.com/1"]);
        assert!(!h.gate.snapshot().is_open());
        assert!(h.api.calls.borrow().is_empty());
    }

    #[test]
    fn new_visitor_gets_modal_for_the_latest_target() {
        let h = harness(Verification::Direct, []);

        h.gate.request_tickets("https://tickets.example.com/1");
        h.gate.set_email("first@b.com".into());
        h.gate.close();
        h.gate.request_tickets("https://tickets.example.com/2");

        let flow = h.gate.snapshot();
        assert_eq!(flow.phase(), GatePhase::CollectingEmail);
        assert_eq!(flow.target(), Some("https://tickets.example.com/2"));
        assert_eq!(flow.session(), &FormSession::default());
        assert!(h.visited().is_empty());
    }

    #[test]
    fn reopening_without_closing_also_resets_the_session() {
        let mut flow = GateFlow::new(Verification::Direct);
        flow.open("https://tickets.example.com/1");
        flow.set_email("a@b.com");
        flow.session.fail("boom");

        flow.open("https://tickets.example.com/2");

        assert_eq!(flow.session(), &FormSession::default());
        assert_eq!(flow.target(), Some("https://tickets.example.com/2"));
    }

    #[test]
    fn direct_submit_persists_closes_and_redirects_once() {
        let h = harness(Verification::Direct, [Ok(())]);
        let renders = Rc::new(RefCell::new(0));
        let counter = renders.clone();
        let gate = h.gate.clone().on_change(move || *counter.borrow_mut() += 1);

        gate.request_tickets("https://tickets.example.com/1");
        gate.set_email("a@b.com".into());
        block_on(gate.submit());

        assert_eq!(h.stored_email().as_deref(), Some("a@b.com"));
        assert!(!gate.snapshot().is_open());
        assert_eq!(h.visited(), vec!["https://tickets.example.com/1"]);
        assert_eq!(
            *h.api.calls.borrow(),
            vec![GateRequest::SubmitEmail(requests::SubmitEmail {
                email: "a@b.com".into()
            })]
        );
        assert!(*renders.borrow() > 0);
    }

    #[test]
    fn rejected_email_keeps_modal_open_with_server_message() {
        let h = harness(Verification::Direct, [Err(rejected("invalid email"))]);

        h.gate.request_tickets("https://tickets.example.com/1");
        h.gate.set_email("a@b".into());
        block_on(h.gate.submit());

        let flow = h.gate.snapshot();
        assert_eq!(flow.phase(), GatePhase::CollectingEmail);
        assert_eq!(flow.session().status, FormStatus::Error);
        assert_eq!(flow.session().message.as_deref(), Some("invalid email"));
        assert_eq!(h.stored_email(), None);
        assert!(h.visited().is_empty());
    }

    #[test]
    fn rejection_without_detail_uses_generic_message_and_allows_retry() {
        let h = harness(
            Verification::Direct,
            [
                Err(ClientError::APIError(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "oops".into(),
                )),
                Ok(()),
            ],
        );

        h.gate.request_tickets("https://tickets.example.com/1");
        h.gate.set_email("a@b.com".into());
        block_on(h.gate.submit());
        assert_eq!(
            h.gate.snapshot().session().message.as_deref(),
            Some("Failed to submit email. Please try again.")
        );

        h.gate.set_email("c@d.com".into());
        block_on(h.gate.submit());
        assert_eq!(h.stored_email().as_deref(), Some("c@d.com"));
        assert_eq!(h.visited().len(), 1);
    }

    #[test]
    fn empty_input_is_rejected_locally() {
        let h = harness(Verification::Direct, []);

        h.gate.request_tickets("https://tickets.example.com/1");
        h.gate.set_email("   ".into());
        block_on(h.gate.submit());

        let flow = h.gate.snapshot();
        assert_eq!(flow.phase(), GatePhase::CollectingEmail);
        assert_eq!(flow.session().status, FormStatus::Error);
        assert!(h.api.calls.borrow().is_empty());
    }

    #[test]
    fn second_submit_while_pending_is_ignored() {
        let mut flow = GateFlow::new(Verification::Direct);
        flow.open("https://tickets.example.com/1");
        flow.set_email("a@b.com");

        assert!(flow.submit().is_some());
        assert!(flow.session().is_pending());
        assert_eq!(flow.submit(), None);
        // The email cannot change under an in-flight request either.
        flow.set_email("other@b.com");
        assert_eq!(flow.session().email, "a@b.com");
    }

    #[test]
    fn wrong_otp_stays_on_code_entry_then_correct_code_redirects() {
        let h = harness(
            Verification::Otp,
            [Ok(()), Err(rejected("Invalid OTP")), Ok(())],
        );

        h.gate.request_tickets("https://tickets.example.com/1");
        h.gate.set_email("a@b.com".into());
        block_on(h.gate.submit());
        assert_eq!(h.gate.snapshot().phase(), GatePhase::AwaitingOtp);

        h.gate.set_otp("000000".into());
        block_on(h.gate.submit());
        let flow = h.gate.snapshot();
        assert_eq!(flow.phase(), GatePhase::AwaitingOtp);
        assert_eq!(flow.session().message.as_deref(), Some("Invalid OTP"));
        assert_eq!(h.stored_email(), None);
        assert!(h.visited().is_empty());

        h.gate.set_otp("424242".into());
        block_on(h.gate.submit());
        assert_eq!(h.stored_email().as_deref(), Some("a@b.com"));
        assert_eq!(h.visited(), vec!["https://tickets.example.com/1"]);

        assert_eq!(
            *h.api.calls.borrow(),
            vec![
                GateRequest::SendOtp(requests::SendOtp {
                    email: "a@b.com".into()
                }),
                GateRequest::VerifyOtp(requests::VerifyOtp {
                    email: "a@b.com".into(),
                    otp: "000000".into()
                }),
                GateRequest::VerifyOtp(requests::VerifyOtp {
                    email: "a@b.com".into(),
                    otp: "424242".into()
                }),
            ]
        );
    }

    #[test]
    fn failed_otp_send_stays_on_email_entry() {
        let h = harness(
            Verification::Otp,
            [Err(ClientError::APIError(
                StatusCode::SERVICE_UNAVAILABLE,
                String::new(),
            ))],
        );

        h.gate.request_tickets("https://tickets.example.com/1");
        h.gate.set_email("a@b.com".into());
        block_on(h.gate.submit());

        let flow = h.gate.snapshot();
        assert_eq!(flow.phase(), GatePhase::CollectingEmail);
        assert_eq!(
            flow.session().message.as_deref(),
            Some("Failed to send OTP. Please try again.")
        );
    }

    #[test]
    fn email_is_fixed_while_awaiting_otp_until_changed() {
        let mut flow = GateFlow::new(Verification::Otp);
        flow.open("https://tickets.example.com/1");
        flow.set_email("a@b.com");
        let pending = flow.submit().unwrap();
        flow.resolve(pending, Ok(()));

        flow.set_email("other@b.com");
        assert_eq!(flow.session().email, "a@b.com");

        flow.set_otp("123");
        flow.change_email();
        assert_eq!(flow.phase(), GatePhase::CollectingEmail);
        assert!(flow.session().otp.is_empty());
        flow.set_email("other@b.com");
        assert_eq!(flow.session().email, "other@b.com");
    }

    #[test]
    fn response_after_close_is_ignored() {
        let mut flow = GateFlow::new(Verification::Direct);
        flow.open("https://tickets.example.com/1");
        flow.set_email("a@b.com");
        let pending = flow.submit().unwrap();

        flow.close();
        flow.open("https://tickets.example.com/2");

        assert_eq!(flow.resolve(pending, Ok(())), Resolution::Stale);
        assert_eq!(flow.phase(), GatePhase::CollectingEmail);
        assert_eq!(flow.session(), &FormSession::default());
    }

    #[test]
    fn late_success_after_close_neither_persists_nor_redirects() {
        let storage = MemoryStorage::new();
        let navigator = Rc::new(RecordingNavigator::default());
        let (reply, receiver) = oneshot::channel();
        let gate = TicketGate::new(
            Verification::Direct,
            SubscriptionStore::new(storage.clone()),
            DeferredApi {
                reply: RefCell::new(Some(receiver)),
            },
            navigator.clone(),
        );

        gate.request_tickets("https://tickets.example.com/1");
        gate.set_email("a@b.com".into());

        block_on(async {
            let abandon = async {
                gate.close();
                reply.send(Ok(())).expect("submit is waiting");
            };
            futures::join!(gate.submit(), abandon);
        });

        assert!(!gate.snapshot().is_open());
        assert_eq!(storage.get(SUBSCRIBER_KEY).unwrap(), None);
        assert!(navigator.visited.borrow().is_empty());
    }

    #[test]
    fn finishing_an_abandoned_flow_leaves_the_new_one_alone() {
        let mut flow = GateFlow::new(Verification::Direct);
        flow.open("https://tickets.example.com/A");
        flow.set_email("a@b.com");
        let pending = flow.submit().unwrap();
        assert!(matches!(
            flow.resolve(pending, Ok(())),
            Resolution::Subscribed { .. }
        ));
        let completed = flow.generation();

        flow.close();
        flow.open("https://tickets.example.com/B");
        flow.set_email("c@d.com");

        assert!(!flow.finish(completed));
        assert_eq!(flow.phase(), GatePhase::CollectingEmail);
        assert_eq!(flow.target(), Some("https://tickets.example.com/B"));
        assert_eq!(flow.session().email, "c@d.com");
    }

    #[test]
    fn closing_before_the_redirect_cancels_it() {
        let h = harness(Verification::Direct, [Ok(())]);
        let gate = h.gate.clone();
        let acted = Rc::new(Cell::new(false));
        // The visitor closes the modal and picks another event while the
        // success message is still up.
        let _subscription = h.gate.store.subscribe(move |_| {
            if !acted.replace(true) {
                gate.close();
                gate.request_tickets("https://tickets.example.com/B");
            }
        });

        h.gate.request_tickets("https://tickets.example.com/A");
        h.gate.set_email("a@b.com".into());
        block_on(h.gate.submit());

        assert_eq!(h.stored_email().as_deref(), Some("a@b.com"));
        assert_eq!(h.visited(), vec!["https://tickets.example.com/B"]);
        assert!(!h.gate.snapshot().is_open());
    }

    #[test]
    fn storage_failure_does_not_block_redirect() {
        let h = harness(Verification::Direct, [Ok(())]);
        h.storage.reject_writes(true);

        h.gate.request_tickets("https://tickets.example.com/1");
        h.gate.set_email("a@b.com".into());
        block_on(h.gate.submit());

        assert_eq!(h.stored_email(), None);
        assert_eq!(h.visited(), vec!["https://tickets.example.com/1"]);
    }

    #[test]
    fn successful_subscribe_notifies_store_observers() {
        let h = harness(Verification::Direct, [Ok(())]);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let _subscription = h
            .gate
            .store
            .subscribe(move |subscribed| sink.borrow_mut().push(subscribed));

        h.gate.request_tickets("https://tickets.example.com/1");
        h.gate.set_email("a@b.com".into());
        block_on(h.gate.submit());

        assert_eq!(*seen.borrow(), vec![true]);
    }
}
