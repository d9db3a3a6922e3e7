//! Application state.
//!
//! `DailyWisdom` holds everything the page used to keep in globals: the
//! catalog, today's item and the notification preferences. Persistence goes
//! through the injected `KeyValueStore`.

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::catalog::{load_catalog, CatalogOrigin, CatalogSource};
use crate::error::Result;
use crate::models::{NotificationTime, Preferences, Wisdom};
use crate::notify::{Permission, PermissionSource, ToggleOutcome};
use crate::selector::select_and_persist;
use crate::storage::KeyValueStore;

pub struct DailyWisdom<S: KeyValueStore> {
    store: S,
    items: Vec<Wisdom>,
    origin: CatalogOrigin,
    current: Wisdom,
    prefs: Preferences,
}

impl<S: KeyValueStore> DailyWisdom<S> {
    /// Load the catalog, pick today's item and restore preferences.
    pub async fn init(store: S, source: &CatalogSource<'_>, today: NaiveDate) -> Result<Self> {
        info!("Initializing Daily Wisdom");
        let catalog = load_catalog(source).await;
        Self::from_items(store, catalog.items, catalog.origin, today)
    }

    pub fn from_items(mut store: S, items: Vec<Wisdom>, origin: CatalogOrigin, today: NaiveDate) -> Result<Self> {
        let current = select_and_persist(&items, today, &mut store)?.wisdom.clone();
        let prefs = Preferences::load(&store);
        debug!(
            id = current.id,
            enabled = prefs.notifications_enabled,
            time = %prefs.notification_time,
            "Daily Wisdom ready"
        );

        Ok(Self {
            store,
            items,
            origin,
            current,
            prefs,
        })
    }

    pub fn current(&self) -> &Wisdom {
        &self.current
    }

    pub fn items(&self) -> &[Wisdom] {
        &self.items
    }

    pub fn catalog_origin(&self) -> CatalogOrigin {
        self.origin
    }

    pub fn preferences(&self) -> &Preferences {
        &self.prefs
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Re-run selection, e.g. after midnight. Returns the (possibly new) current item.
    pub fn refresh(&mut self, today: NaiveDate) -> Result<&Wisdom> {
        self.current = select_and_persist(&self.items, today, &mut self.store)?
            .wisdom
            .clone();
        Ok(&self.current)
    }

    /// Switch daily notifications on or off.
    ///
    /// Enabling asks `permission` first. Anything short of granted reverts the
    /// toggle to off and returns the message to show the user.
    pub fn toggle_notifications(
        &mut self,
        enabled: bool,
        permission: &mut dyn PermissionSource,
    ) -> Result<ToggleOutcome> {
        self.prefs.notifications_enabled = enabled;
        self.prefs.save_enabled(&mut self.store)?;

        if !enabled {
            self.cancel_notifications();
            return Ok(ToggleOutcome::Disabled);
        }

        let granted = request_permission(permission);
        if let Some(message) = granted.denial_message() {
            warn!(permission = %granted, "Notification permission not granted, reverting");
            self.prefs.notifications_enabled = false;
            self.prefs.save_enabled(&mut self.store)?;
            return Ok(ToggleOutcome::Reverted {
                permission: granted,
                message: message.to_string(),
            });
        }

        self.schedule_notification();
        Ok(ToggleOutcome::Enabled)
    }

    /// Persist a new notification time, rescheduling if notifications are on.
    pub fn update_time(&mut self, time: NotificationTime) -> Result<()> {
        self.prefs.notification_time = time;
        self.prefs.save_time(&mut self.store)?;
        if self.prefs.notifications_enabled {
            self.schedule_notification();
        }
        Ok(())
    }

    fn schedule_notification(&self) {
        // Delivery happens in the periodic daily tick; nothing to arm here
        info!(time = %self.prefs.notification_time, "Notification scheduled");
    }

    fn cancel_notifications(&self) {
        info!("Notifications cancelled");
    }
}

fn request_permission(source: &mut dyn PermissionSource) -> Permission {
    match source.current() {
        Permission::Granted => Permission::Granted,
        Permission::Unsupported => Permission::Unsupported,
        _ => source.request(),
    }
}
