//! Payment Collector
//!
//! Client half of the two-phase handshake: ask the intent server for a
//! client secret, then confirm the card payment with the processor.
//!
//! ```text
//! Idle ──submit──▶ Submitting ──secret──▶ AwaitingConfirmation ──▶ Resolved ──▶ Idle
//!   │                  │                                              ▲
//!   │ not ready        └────────────── transport / server error ──────┘
//!   ▼
//! NotReady (nothing sent, form untouched)
//! ```
//!
//! Every resolved submission resets the form and clears the card widget,
//! whatever the outcome.

use async_trait::async_trait;

use crate::error::Result;
use crate::model::{BillingDetails, ClientSecret, FormState, PaymentRequest, PaymentStatus};

/// Obtains a client secret for a payment request (the intent server).
///
/// Futures are not `Send`: implementations run on the browser's event loop.
#[async_trait(?Send)]
pub trait IntentIssuer {
    async fn create_intent(&self, request: &PaymentRequest) -> Result<ClientSecret>;
}

/// What the processor's client library reported for a confirmation
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Confirmation {
    /// Intent reached the terminal `succeeded` state
    Succeeded,

    /// Processor returned an error object (decline, invalid card, ...)
    Declined(String),

    /// No error, but the intent is in some other state
    Pending(String),
}

/// Embedded card widget plus the processor's confirmation call
#[async_trait(?Send)]
pub trait CardConfirmer {
    /// Whether the processor library finished initializing
    fn is_ready(&self) -> bool;

    /// Confirm the intent behind `secret` with the card currently entered
    async fn confirm(&self, secret: &ClientSecret, billing: &BillingDetails)
    -> Result<Confirmation>;

    /// Wipe the card input
    fn clear(&self);
}

/// Observable lifecycle of one submission
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CollectorState {
    Idle,
    Submitting,
    AwaitingConfirmation,
    Resolved(Outcome),
}

impl CollectorState {
    /// A request is in flight
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Submitting | Self::AwaitingConfirmation)
    }
}

/// Terminal result of a submission
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Succeeded,
    Failed(String),
    /// Issuer unreachable, issuer error, or confirmation threw
    Errored,
    /// Confirmation finished in a non-terminal intent state
    Incomplete(String),
}

/// Everything the UI needs after a resolved submission
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub outcome: Outcome,

    /// Status message to display
    pub status: PaymentStatus,

    /// Form contents to display (always the defaults)
    pub form: FormState,
}

/// Result of calling [`PaymentCollector::submit_with`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Submission {
    /// Card widget not initialized; nothing was sent
    NotReady,
    Resolved(Resolution),
}

/// Drives one form submission through the handshake
pub struct PaymentCollector<I> {
    issuer: I,
    currency: String,
}

impl<I: IntentIssuer> PaymentCollector<I> {
    pub fn new(issuer: I, currency: impl Into<String>) -> Self {
        Self {
            issuer,
            currency: currency.into(),
        }
    }

    /// Submit the form, reporting each state change to `on_transition`.
    ///
    /// `previous` is the status currently displayed; it is kept when the
    /// confirmation ends in a non-terminal state.
    pub async fn submit_with<C, F>(
        &self,
        card: Option<&C>,
        form: &FormState,
        previous: &PaymentStatus,
        mut on_transition: F,
    ) -> Submission
    where
        C: CardConfirmer + ?Sized,
        F: FnMut(CollectorState),
    {
        let Some(card) = card.filter(|c| c.is_ready()) else {
            tracing::debug!("Payment library not ready, submission ignored");
            return Submission::NotReady;
        };

        on_transition(CollectorState::Submitting);
        let outcome = self.run(card, form, &mut on_transition).await;

        let status = match &outcome {
            Outcome::Succeeded => PaymentStatus::Succeeded,
            Outcome::Failed(message) => PaymentStatus::Failed(message.clone()),
            Outcome::Errored => PaymentStatus::Errored,
            Outcome::Incomplete(_) => previous.clone(),
        };

        card.clear();
        on_transition(CollectorState::Resolved(outcome.clone()));
        on_transition(CollectorState::Idle);

        Submission::Resolved(Resolution {
            outcome,
            status,
            form: FormState::default(),
        })
    }

    async fn run<C, F>(&self, card: &C, form: &FormState, on_transition: &mut F) -> Outcome
    where
        C: CardConfirmer + ?Sized,
        F: FnMut(CollectorState),
    {
        let request = PaymentRequest::from_form(form, &self.currency);
        tracing::debug!(
            amount = request.amount,
            currency = %request.currency,
            "Requesting payment intent"
        );

        let secret = match self.issuer.create_intent(&request).await {
            Ok(secret) if !secret.is_empty() => secret,
            Ok(_) => {
                tracing::warn!("Intent server returned an empty client secret");
                return Outcome::Errored;
            }
            Err(e) => {
                tracing::warn!("Payment intent request failed: {}", e);
                return Outcome::Errored;
            }
        };

        on_transition(CollectorState::AwaitingConfirmation);

        match card.confirm(&secret, &form.billing_details()).await {
            Ok(Confirmation::Succeeded) => Outcome::Succeeded,
            Ok(Confirmation::Declined(message)) => Outcome::Failed(message),
            Ok(Confirmation::Pending(status)) => {
                tracing::debug!(status = %status, "Payment intent not yet terminal");
                Outcome::Incomplete(status)
            }
            Err(e) => {
                tracing::warn!("Card confirmation failed: {}", e);
                Outcome::Errored
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CollectorError;
    use crate::model::FormField;
    use std::cell::{Cell, RefCell};

    /// Issuer that answers from a fixed script and records requests
    struct ScriptedIssuer {
        reply: fn() -> Result<ClientSecret>,
        requests: RefCell<Vec<PaymentRequest>>,
    }

    impl ScriptedIssuer {
        fn new(reply: fn() -> Result<ClientSecret>) -> Self {
            Self {
                reply,
                requests: RefCell::new(Vec::new()),
            }
        }
    }

    #[async_trait(?Send)]
    impl IntentIssuer for ScriptedIssuer {
        async fn create_intent(&self, request: &PaymentRequest) -> Result<ClientSecret> {
            self.requests.borrow_mut().push(request.clone());
            (self.reply)()
        }
    }

    struct FakeCard {
        ready: bool,
        reply: fn() -> Result<Confirmation>,
        cleared: Cell<u32>,
        billing: RefCell<Option<BillingDetails>>,
    }

    impl FakeCard {
        fn replying(reply: fn() -> Result<Confirmation>) -> Self {
            Self {
                ready: true,
                reply,
                cleared: Cell::new(0),
                billing: RefCell::new(None),
            }
        }
    }

    #[async_trait(?Send)]
    impl CardConfirmer for FakeCard {
        fn is_ready(&self) -> bool {
            self.ready
        }

        async fn confirm(
            &self,
            _secret: &ClientSecret,
            billing: &BillingDetails,
        ) -> Result<Confirmation> {
            *self.billing.borrow_mut() = Some(billing.clone());
            (self.reply)()
        }

        fn clear(&self) {
            self.cleared.set(self.cleared.get() + 1);
        }
    }

    fn good_secret() -> Result<ClientSecret> {
        Ok(ClientSecret::new("pi_1_secret_2"))
    }

    fn filled_form() -> FormState {
        FormState::default()
            .with_input(FormField::Name, "Ada")
            .with_input(FormField::Email, "ada@example.com")
            .with_input(FormField::Amount, "10.00")
    }

    async fn submit(
        collector: &PaymentCollector<ScriptedIssuer>,
        card: &FakeCard,
        form: &FormState,
        previous: &PaymentStatus,
    ) -> Submission {
        collector.submit_with(Some(card), form, previous, |_| {}).await
    }

    fn resolved(submission: Submission) -> Resolution {
        match submission {
            Submission::Resolved(resolution) => resolution,
            Submission::NotReady => panic!("expected a resolved submission"),
        }
    }

    #[tokio::test]
    async fn test_successful_payment() {
        let collector = PaymentCollector::new(ScriptedIssuer::new(good_secret), "usd");
        let card = FakeCard::replying(|| Ok(Confirmation::Succeeded));

        let resolution = resolved(
            submit(&collector, &card, &filled_form(), &PaymentStatus::None).await,
        );

        assert_eq!(resolution.outcome, Outcome::Succeeded);
        assert_eq!(resolution.status.to_string(), "Payment succeeded!");
        assert_eq!(resolution.form, FormState::default());
        assert_eq!(card.cleared.get(), 1);

        let requests = collector.issuer.requests.borrow();
        assert_eq!(requests.as_slice(), &[PaymentRequest::new(1000, "usd")]);
        assert_eq!(
            card.billing.borrow().as_ref().map(|b| b.name.as_str()),
            Some("Ada")
        );
    }

    #[tokio::test]
    async fn test_declined_card() {
        let collector = PaymentCollector::new(ScriptedIssuer::new(good_secret), "usd");
        let card = FakeCard::replying(|| {
            Ok(Confirmation::Declined("Your card was declined.".into()))
        });

        let resolution = resolved(
            submit(&collector, &card, &filled_form(), &PaymentStatus::None).await,
        );

        assert_eq!(
            resolution.status.to_string(),
            "Payment failed: Your card was declined."
        );
        assert_eq!(resolution.form, FormState::default());
        assert_eq!(card.cleared.get(), 1);
    }

    #[tokio::test]
    async fn test_server_unreachable() {
        let issuer =
            ScriptedIssuer::new(|| Err(CollectorError::Transport("connection refused".into())));
        let collector = PaymentCollector::new(issuer, "usd");
        let card = FakeCard::replying(|| Ok(Confirmation::Succeeded));

        let resolution = resolved(
            submit(&collector, &card, &filled_form(), &PaymentStatus::Succeeded).await,
        );

        assert_eq!(resolution.outcome, Outcome::Errored);
        assert_eq!(resolution.status.to_string(), "Error processing payment.");
        assert_eq!(resolution.form, FormState::default());
        assert!(card.billing.borrow().is_none());
        assert_eq!(card.cleared.get(), 1);
    }

    #[tokio::test]
    async fn test_server_rejection_is_reported_as_error() {
        let issuer = ScriptedIssuer::new(|| {
            Err(CollectorError::Rejected {
                status: 400,
                message: "This value must be greater than or equal to 1.".into(),
            })
        });
        let collector = PaymentCollector::new(issuer, "usd");
        let card = FakeCard::replying(|| Ok(Confirmation::Succeeded));

        let resolution = resolved(
            submit(&collector, &card, &FormState::default(), &PaymentStatus::None).await,
        );

        assert_eq!(resolution.status, PaymentStatus::Errored);
    }

    #[tokio::test]
    async fn test_confirmation_exception() {
        let collector = PaymentCollector::new(ScriptedIssuer::new(good_secret), "usd");
        let card =
            FakeCard::replying(|| Err(CollectorError::Confirmation("IntegrationError".into())));

        let resolution = resolved(
            submit(&collector, &card, &filled_form(), &PaymentStatus::None).await,
        );

        assert_eq!(resolution.status, PaymentStatus::Errored);
        assert_eq!(resolution.form, FormState::default());
    }

    #[tokio::test]
    async fn test_pending_keeps_previous_status() {
        let collector = PaymentCollector::new(ScriptedIssuer::new(good_secret), "usd");
        let card = FakeCard::replying(|| Ok(Confirmation::Pending("processing".into())));
        let previous = PaymentStatus::Failed("Your card was declined.".into());

        let resolution = resolved(submit(&collector, &card, &filled_form(), &previous).await);

        assert_eq!(resolution.outcome, Outcome::Incomplete("processing".into()));
        assert_eq!(resolution.status, previous);
        assert_eq!(resolution.form, FormState::default());
    }

    #[tokio::test]
    async fn test_not_ready_sends_nothing() {
        let collector = PaymentCollector::new(ScriptedIssuer::new(good_secret), "usd");
        let mut card = FakeCard::replying(|| Ok(Confirmation::Succeeded));
        card.ready = false;

        let submission = submit(&collector, &card, &filled_form(), &PaymentStatus::None).await;
        assert_eq!(submission, Submission::NotReady);

        let submission = collector
            .submit_with::<FakeCard, _>(None, &filled_form(), &PaymentStatus::None, |_| {})
            .await;
        assert_eq!(submission, Submission::NotReady);

        assert!(collector.issuer.requests.borrow().is_empty());
        assert_eq!(card.cleared.get(), 0);
    }

    #[tokio::test]
    async fn test_state_transitions() {
        let collector = PaymentCollector::new(ScriptedIssuer::new(good_secret), "usd");
        let card = FakeCard::replying(|| Ok(Confirmation::Succeeded));
        let mut seen = Vec::new();

        collector
            .submit_with(Some(&card), &filled_form(), &PaymentStatus::None, |state| {
                seen.push(state);
            })
            .await;

        assert_eq!(
            seen,
            vec![
                CollectorState::Submitting,
                CollectorState::AwaitingConfirmation,
                CollectorState::Resolved(Outcome::Succeeded),
                CollectorState::Idle,
            ]
        );
        assert!(seen[0].is_busy());
        assert!(!seen[3].is_busy());
    }

    #[tokio::test]
    async fn test_fractional_cents_truncate() {
        let collector = PaymentCollector::new(ScriptedIssuer::new(good_secret), "usd");
        let card = FakeCard::replying(|| Ok(Confirmation::Succeeded));
        let form = FormState::default().with_input(FormField::Amount, "12.349");

        submit(&collector, &card, &form, &PaymentStatus::None).await;

        assert_eq!(collector.issuer.requests.borrow()[0].amount, 1234);
    }
}
