//! Form controller: field updates, validation and submission

use crate::{
    render_quote, CompanyProfile, DocumentSink, Field, LogoSource, QuoteRecord, SubmitError,
};
use chrono::{DateTime, Duration, Utc};
use tracing::{info, instrument};

/// How long the success indicator stays visible after a save
pub const SUCCESS_INDICATOR_SECS: i64 = 4;

/// Clears the busy flag when dropped, whatever path the submit takes
struct BusyGuard<'a>(&'a mut bool);

impl<'a> BusyGuard<'a> {
    fn set(flag: &'a mut bool) -> Self {
        *flag = true;
        Self(flag)
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}

/// Owns the record being edited and turns it into a saved document
pub struct FormController<L, S> {
    profile: CompanyProfile,
    record: QuoteRecord,
    logo: L,
    sink: S,
    busy: bool,
    last_success: Option<DateTime<Utc>>,
}

impl<L: LogoSource, S: DocumentSink> FormController<L, S> {
    /// Create a controller with a fresh record for today
    pub fn new(profile: CompanyProfile, logo: L, sink: S) -> Self {
        let record = QuoteRecord::default_for(&profile);
        Self::with_record(profile, record, logo, sink)
    }

    /// Create a controller editing an existing record
    pub fn with_record(profile: CompanyProfile, record: QuoteRecord, logo: L, sink: S) -> Self {
        Self {
            profile,
            record,
            logo,
            sink,
            busy: false,
            last_success: None,
        }
    }

    pub fn record(&self) -> &QuoteRecord {
        &self.record
    }

    pub fn profile(&self) -> &CompanyProfile {
        &self.profile
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Whether a submit is in progress
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// When the last document was saved
    pub fn last_success(&self) -> Option<DateTime<Utc>> {
        self.last_success
    }

    /// Whether the success indicator should show at `now`
    pub fn success_visible_at(&self, now: DateTime<Utc>) -> bool {
        match self.last_success {
            Some(at) => now >= at && now - at < Duration::seconds(SUCCESS_INDICATOR_SECS),
            None => false,
        }
    }

    /// Apply one field edit; returns the updated record
    pub fn on_field_change(&mut self, field: Field, value: &str) -> &QuoteRecord {
        self.record = self.record.clone().with_field(field, value);
        &self.record
    }

    /// Check or uncheck an accessory; returns the updated record
    pub fn on_accessory_toggle(&mut self, accessory: &str, checked: bool) -> &QuoteRecord {
        self.record = self.record.clone().with_accessory(accessory, checked);
        &self.record
    }

    /// Validate, render and save the current record
    ///
    /// Nothing is rendered when a submit is already running or a required
    /// field is missing. The busy flag is cleared on every exit path.
    #[instrument(skip(self), fields(quote_number = %self.record.quote_number))]
    pub async fn submit(&mut self) -> Result<(), SubmitError> {
        if self.busy {
            return Err(SubmitError::Busy);
        }
        self.record.validate()?;

        let _busy = BusyGuard::set(&mut self.busy);

        let resolved = self.record.resolve();
        let rendered = render_quote(&resolved, &self.profile, &self.logo).await?;
        self.sink.save(&rendered)?;

        self.last_success = Some(Utc::now());
        info!(filename = %rendered.filename, "quote generated");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LogoError, MemorySink, NoLogo, RenderedQuote, SinkError, ValidationError};
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::cell::Cell;

    /// Counts how many renders reached the logo step
    #[derive(Default)]
    struct CountingLogo {
        loads: Cell<usize>,
    }

    impl LogoSource for CountingLogo {
        async fn load(&self) -> Result<Vec<u8>, LogoError> {
            self.loads.set(self.loads.get() + 1);
            Err(LogoError::Missing)
        }
    }

    struct FailingSink;

    impl DocumentSink for FailingSink {
        fn save(&self, _quote: &RenderedQuote) -> Result<(), SinkError> {
            Err(SinkError::Download("blocked".to_string()))
        }
    }

    fn record() -> QuoteRecord {
        let today = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
        QuoteRecord::new(
            &CompanyProfile::default(),
            today,
            &mut StdRng::seed_from_u64(3),
        )
    }

    fn controller<L: LogoSource, S: DocumentSink>(logo: L, sink: S) -> FormController<L, S> {
        FormController::with_record(CompanyProfile::default(), record(), logo, sink)
    }

    fn fill_required<L: LogoSource, S: DocumentSink>(form: &mut FormController<L, S>) {
        form.on_field_change(Field::ClientName, "Maria Souza");
        form.on_field_change(Field::Model, "Series 11 Ultra (49mm)");
        form.on_field_change(Field::ProductValue, "150000");
    }

    #[test]
    fn test_field_change_masks() {
        let mut form = controller(NoLogo, MemorySink::new());
        let record = form.on_field_change(Field::ClientPhone, "21980202797");
        assert_eq!(record.client_phone, "(21) 98020-2797");

        form.on_accessory_toggle("Manual", false);
        assert_eq!(form.record().accessories.len(), 3);
    }

    #[tokio::test]
    async fn test_submit_invalid_never_renders() {
        let sink = MemorySink::new();
        let mut form = controller(CountingLogo::default(), &sink);

        let err = form.submit().await.unwrap_err();
        assert!(matches!(
            err,
            SubmitError::Invalid(ValidationError::MissingClientName)
        ));
        assert_eq!(form.logo.loads.get(), 0);
        assert!(sink.is_empty());
        assert!(!form.is_busy());
        assert_eq!(form.last_success(), None);
    }

    #[tokio::test]
    async fn test_submit_saves_once() {
        let sink = MemorySink::new();
        let mut form = controller(CountingLogo::default(), &sink);
        fill_required(&mut form);

        assert!(!form.is_busy());
        form.submit().await.unwrap();
        assert!(!form.is_busy());

        assert_eq!(form.logo.loads.get(), 1);
        assert_eq!(sink.len(), 1);
        assert_eq!(
            sink.saved()[0].filename,
            "orcamento-smart-ilha-maria-souza.pdf"
        );
        assert!(form.last_success().is_some());
    }

    #[tokio::test]
    async fn test_submit_while_busy_is_rejected() {
        let sink = MemorySink::new();
        let mut form = controller(CountingLogo::default(), &sink);
        fill_required(&mut form);
        form.busy = true;

        assert!(matches!(form.submit().await, Err(SubmitError::Busy)));
        assert_eq!(form.logo.loads.get(), 0);
        assert!(sink.is_empty());
    }

    #[tokio::test]
    async fn test_save_failure_clears_busy() {
        let mut form = controller(NoLogo, FailingSink);
        fill_required(&mut form);

        let err = form.submit().await.unwrap_err();
        assert!(matches!(err, SubmitError::Save(_)));
        assert_eq!(
            err.user_message().as_deref(),
            Some("Erro ao gerar PDF. Tente novamente.")
        );
        assert!(!form.is_busy());
        assert_eq!(form.last_success(), None);
    }

    #[tokio::test]
    async fn test_success_indicator_window() {
        let mut form = controller(NoLogo, MemorySink::new());
        fill_required(&mut form);
        assert!(!form.success_visible_at(Utc::now()));

        form.submit().await.unwrap();
        let at = form.last_success().unwrap();

        assert!(form.success_visible_at(at));
        assert!(form.success_visible_at(at + Duration::milliseconds(3_999)));
        assert!(!form.success_visible_at(at + Duration::seconds(4)));
        assert!(!form.success_visible_at(at - Duration::seconds(1)));
    }
}
