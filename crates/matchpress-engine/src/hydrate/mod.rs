//! # Embed Hydrator
//!
//! Post-render, best-effort upgrade of embed placeholders into live
//! third-party embeds, with a deterministic fallback card when an embed
//! cannot be constructed or reports a load error.
//!
//! ## State machine (per placeholder)
//!
//! `Placeholder → Attempting → {Live, Fallback}`, both terminal.
//!
//! - `Placeholder → Attempting`: one [`hydrate`] pass over the container,
//!   after the host page has attached the pipeline's output.
//! - `Attempting → Live`: the provider's embed resource loads; the host owns
//!   this signal, the engine has nothing left to do.
//! - `Attempting → Fallback`: the embed URL cannot be computed, attachment
//!   fails, or the provider reports a load error
//!   ([`report_load_failure`]).
//!
//! A stalled load that never signals anything stays `Attempting`; no timeout
//! is imposed, providers manage their own lifecycle. There are no retries
//! either: a failure is permanently `Fallback`.
//!
//! The machine operates over an abstract host ([`EmbedHost`]) so the same
//! logic drives any UI runtime that can find placeholder nodes and replace
//! them.

pub mod providers;

use thiserror::Error;

use crate::schema::EmbedService;

/// Everything a placeholder carries, read back from its `data-*` attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbedRequest {
    pub service: EmbedService,
    pub source_url: String,
    pub embed_url: Option<String>,
    pub caption: Option<String>,
}

/// Lifecycle of one placeholder. `Live` and `Fallback` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HydrationState {
    Placeholder,
    Attempting,
    Live,
    Fallback,
}

#[derive(Debug, Error)]
pub enum EmbedError {
    #[error("no embed URL derivable from source: {0}")]
    UnrecognizedSource(String),
    #[error("embed could not be attached: {0}")]
    AttachFailed(String),
}

/// The surface a UI runtime exposes to the hydrator.
///
/// Contract: `scan` returns only nodes still in the `Placeholder` state, so
/// re-running [`hydrate`] over an already-hydrated container is a no-op.
pub trait EmbedHost {
    /// Opaque reference to one placeholder node.
    type Handle;

    /// All remaining placeholders in the container, in document order.
    fn scan(&mut self) -> Vec<(Self::Handle, EmbedRequest)>;

    /// Replaces the placeholder with live embed markup. An `Err` means
    /// construction failed and the placeholder is still in place.
    fn attach(&mut self, handle: &Self::Handle, embed_html: &str) -> Result<(), EmbedError>;

    /// Replaces the placeholder (or a failed embed) with the fallback card.
    fn replace_with_fallback(&mut self, handle: &Self::Handle, card_html: &str);
}

/// Outcome counts of one hydration pass, tallied from the
/// [`HydrationState`] each placeholder ends the pass in.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HydrationReport {
    /// Placeholders found by the scan.
    pub scanned: usize,
    /// Embeds attached and now awaiting their provider's own load signal.
    pub attempting: usize,
    /// Placeholders resolved directly to the fallback card.
    pub fallbacks: usize,
}

impl HydrationReport {
    fn record(&mut self, state: HydrationState) {
        self.scanned += 1;
        match state {
            HydrationState::Attempting => self.attempting += 1,
            HydrationState::Fallback => self.fallbacks += 1,
            // A pass never leaves a node scanned-but-placeholder, and Live
            // is the provider's signal, not ours.
            HydrationState::Placeholder | HydrationState::Live => {}
        }
    }
}

/// Runs one hydration pass over the host's container.
///
/// Each placeholder is processed independently; a failure in one never
/// blocks the others. Fire-and-forget: attached embeds are not awaited.
pub fn hydrate<H: EmbedHost>(host: &mut H) -> HydrationReport {
    let mut report = HydrationReport::default();
    for (handle, request) in host.scan() {
        report.record(hydrate_one(host, &handle, &request));
    }
    report
}

/// Advances a single placeholder and returns the state it ended up in.
fn hydrate_one<H: EmbedHost>(
    host: &mut H,
    handle: &H::Handle,
    request: &EmbedRequest,
) -> HydrationState {
    match providers::embed_markup(request) {
        Ok(markup) => match host.attach(handle, &markup) {
            Ok(()) => HydrationState::Attempting,
            Err(err) => {
                log::debug!("embed attach failed, using fallback: {err}");
                host.replace_with_fallback(handle, &providers::fallback_card(request));
                HydrationState::Fallback
            }
        },
        Err(err) => {
            log::debug!("embed not constructible, using fallback: {err}");
            host.replace_with_fallback(handle, &providers::fallback_card(request));
            HydrationState::Fallback
        }
    }
}

/// Host callback for an embed that attached but later reported a load
/// error. Transitions the node permanently to `Fallback`.
pub fn report_load_failure<H: EmbedHost>(host: &mut H, handle: &H::Handle, request: &EmbedRequest) {
    host.replace_with_fallback(handle, &providers::fallback_card(request));
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// In-memory host: a list of slots that move through the state machine.
    struct TestHost {
        slots: Vec<Slot>,
        fail_attach: bool,
    }

    struct Slot {
        request: EmbedRequest,
        state: HydrationState,
        markup: Option<String>,
    }

    impl TestHost {
        fn new(requests: Vec<EmbedRequest>) -> Self {
            Self {
                slots: requests
                    .into_iter()
                    .map(|request| Slot {
                        request,
                        state: HydrationState::Placeholder,
                        markup: None,
                    })
                    .collect(),
                fail_attach: false,
            }
        }
    }

    impl EmbedHost for TestHost {
        type Handle = usize;

        fn scan(&mut self) -> Vec<(usize, EmbedRequest)> {
            self.slots
                .iter()
                .enumerate()
                .filter(|(_, slot)| slot.state == HydrationState::Placeholder)
                .map(|(i, slot)| (i, slot.request.clone()))
                .collect()
        }

        fn attach(&mut self, handle: &usize, embed_html: &str) -> Result<(), EmbedError> {
            if self.fail_attach {
                return Err(EmbedError::AttachFailed("forced".into()));
            }
            let slot = &mut self.slots[*handle];
            slot.state = HydrationState::Attempting;
            slot.markup = Some(embed_html.to_owned());
            Ok(())
        }

        fn replace_with_fallback(&mut self, handle: &usize, card_html: &str) {
            let slot = &mut self.slots[*handle];
            slot.state = HydrationState::Fallback;
            slot.markup = Some(card_html.to_owned());
        }
    }

    fn twitter_request() -> EmbedRequest {
        EmbedRequest {
            service: EmbedService::Twitter,
            source_url: "https://twitter.com/FCBarcelona/status/123".into(),
            embed_url: None,
            caption: None,
        }
    }

    fn broken_request() -> EmbedRequest {
        EmbedRequest {
            service: EmbedService::Other,
            source_url: "https://example.com/whatever".into(),
            embed_url: None,
            caption: None,
        }
    }

    #[test]
    fn placeholders_move_to_attempting() {
        let mut host = TestHost::new(vec![twitter_request()]);
        let report = hydrate(&mut host);
        assert_eq!(report.scanned, 1);
        assert_eq!(report.attempting, 1);
        assert_eq!(host.slots[0].state, HydrationState::Attempting);
        assert!(host.slots[0].markup.as_ref().unwrap().contains("<iframe"));
    }

    #[test]
    fn underivable_embed_goes_straight_to_fallback() {
        let mut host = TestHost::new(vec![broken_request()]);
        let report = hydrate(&mut host);
        assert_eq!(report.fallbacks, 1);
        assert_eq!(host.slots[0].state, HydrationState::Fallback);
        assert!(
            host.slots[0]
                .markup
                .as_ref()
                .unwrap()
                .contains("embed-fallback")
        );
    }

    #[test]
    fn one_failure_does_not_block_the_others() {
        let mut host = TestHost::new(vec![broken_request(), twitter_request(), broken_request()]);
        let report = hydrate(&mut host);
        assert_eq!(report.scanned, 3);
        assert_eq!(report.attempting, 1);
        assert_eq!(report.fallbacks, 2);
        assert_eq!(host.slots[1].state, HydrationState::Attempting);
    }

    #[test]
    fn report_tallies_match_final_slot_states() {
        let mut host = TestHost::new(vec![
            twitter_request(),
            broken_request(),
            twitter_request(),
        ]);
        let report = hydrate(&mut host);

        let in_state = |state| host.slots.iter().filter(|s| s.state == state).count();
        assert_eq!(report.scanned, host.slots.len());
        assert_eq!(report.attempting, in_state(HydrationState::Attempting));
        assert_eq!(report.fallbacks, in_state(HydrationState::Fallback));
    }

    #[test]
    fn attach_failure_falls_back() {
        let mut host = TestHost::new(vec![twitter_request()]);
        host.fail_attach = true;
        let report = hydrate(&mut host);
        assert_eq!(report.fallbacks, 1);
        assert_eq!(host.slots[0].state, HydrationState::Fallback);
    }

    #[test]
    fn forced_twitter_failure_yields_handle_and_source_link() {
        let mut host = TestHost::new(vec![twitter_request()]);
        host.fail_attach = true;
        hydrate(&mut host);
        let card = host.slots[0].markup.as_ref().unwrap();
        assert!(card.contains("@FCBarcelona"));
        assert!(card.contains(r#"href="https://twitter.com/FCBarcelona/status/123""#));
    }

    #[test]
    fn rerunning_hydration_is_a_no_op() {
        let mut host = TestHost::new(vec![twitter_request(), broken_request()]);
        let first = hydrate(&mut host);
        assert_eq!(first.scanned, 2);
        let second = hydrate(&mut host);
        assert_eq!(second, HydrationReport::default());
    }

    #[test]
    fn load_failure_after_attach_becomes_fallback() {
        let mut host = TestHost::new(vec![twitter_request()]);
        hydrate(&mut host);
        assert_eq!(host.slots[0].state, HydrationState::Attempting);

        let request = host.slots[0].request.clone();
        report_load_failure(&mut host, &0, &request);
        assert_eq!(host.slots[0].state, HydrationState::Fallback);
        assert!(
            host.slots[0]
                .markup
                .as_ref()
                .unwrap()
                .contains("@FCBarcelona")
        );
    }
}
