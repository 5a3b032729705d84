use contracts::domain::a001_commodity::aggregate::{Commodity, CommodityDto};
use contracts::domain::common::FieldErrors;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::fields::{initial_dto, FieldDescriptor, FieldName};
use super::model;
use crate::shared::cache::{RevalidationCache, COMMODITIES_KEY};

/// ViewModel for the currency form
#[derive(Clone, Copy)]
pub struct CurrencyFormViewModel {
    pub form: RwSignal<CommodityDto>,
    pub errors: RwSignal<FieldErrors>,
    /// Persistence failure, shown above the submit button.
    pub submit_error: RwSignal<Option<String>>,
    pub saving: RwSignal<bool>,
}

impl CurrencyFormViewModel {
    pub fn new(fields: &[FieldDescriptor]) -> Self {
        Self {
            form: RwSignal::new(initial_dto(fields)),
            errors: RwSignal::new(FieldErrors::new()),
            submit_error: RwSignal::new(None),
            saving: RwSignal::new(false),
        }
    }

    pub fn error_of(&self, name: FieldName) -> Option<String> {
        self.errors.with(|e| e.get(name.key()).map(str::to_string))
    }

    /// Validation runs on every change.
    pub fn set_field(&self, field: FieldDescriptor, raw: &str) {
        self.form
            .update(|dto| field.name.write(dto, field.kind.normalize(raw)));
        self.revalidate();
    }

    fn revalidate(&self) -> bool {
        let errors = self.form.with(|dto| dto.validate().err().unwrap_or_default());
        let valid = errors.is_empty();
        self.errors.set(errors);
        valid
    }

    pub fn can_submit(&self) -> bool {
        self.errors.with(FieldErrors::is_empty) && !self.saving.get()
    }

    /// Validate, persist, invalidate the commodity list, then hand the record to `on_save`.
    pub fn submit_command(&self, cache: RevalidationCache, on_save: Callback<Commodity>) {
        if !self.revalidate() || self.saving.get_untracked() {
            return;
        }

        let dto = self.form.get_untracked();
        let saving = self.saving;
        let submit_error = self.submit_error;
        saving.set(true);
        submit_error.set(None);

        spawn_local(async move {
            let result = model::create_commodity(&dto).await;
            let failure = finish_submit(result, &cache, |commodity| on_save.run(commodity));
            submit_error.set(failure);
            saving.set(false);
        });
    }
}

/// Success invalidates the list and calls back; failure only yields the message.
pub(crate) fn finish_submit(
    result: Result<Commodity, String>,
    cache: &RevalidationCache,
    on_save: impl FnOnce(Commodity),
) -> Option<String> {
    match result {
        Ok(commodity) => {
            log::info!("Commodity {} created", commodity.mnemonic);
            cache.invalidate(COMMODITIES_KEY);
            on_save(commodity);
            None
        }
        Err(e) => {
            log::warn!("Commodity save failed: {}", e);
            Some(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_commodity::aggregate::CommodityId;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn counting_subscriber(cache: &RevalidationCache) -> (Arc<AtomicUsize>, crate::shared::cache::Subscription) {
        let invalidations = Arc::new(AtomicUsize::new(0));
        let counter = invalidations.clone();
        let sub = cache.subscribe(COMMODITIES_KEY, move |value| {
            if value.is_none() {
                counter.fetch_add(1, Ordering::SeqCst);
            }
        });
        (invalidations, sub)
    }

    #[test]
    fn test_success_invalidates_then_calls_back() {
        let cache = RevalidationCache::new();
        cache.mutate_with(COMMODITIES_KEY, &Vec::<Commodity>::new());
        let (invalidations, _sub) = counting_subscriber(&cache);

        let eur = Commodity {
            guid: CommodityId::new_v4(),
            namespace: "CURRENCY".into(),
            mnemonic: "EUR".into(),
        };
        let mut saved = None;
        let failure = finish_submit(Ok(eur.clone()), &cache, |c| {
            // List already invalidated when the caller hears about the record
            assert_eq!(cache.get(COMMODITIES_KEY), None);
            saved = Some(c);
        });

        assert_eq!(failure, None);
        assert_eq!(saved, Some(eur));
        assert_eq!(invalidations.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_failure_keeps_cache_and_skips_callback() {
        let cache = RevalidationCache::new();
        cache.mutate_with(COMMODITIES_KEY, &Vec::<Commodity>::new());
        let (invalidations, _sub) = counting_subscriber(&cache);

        let mut called = false;
        let failure = finish_submit(
            Err("Commodity CURRENCY:EUR already exists".to_string()),
            &cache,
            |_| called = true,
        );

        assert_eq!(failure.as_deref(), Some("Commodity CURRENCY:EUR already exists"));
        assert!(!called);
        assert_eq!(invalidations.load(Ordering::SeqCst), 0);
        assert!(cache.get(COMMODITIES_KEY).is_some());
    }
}
