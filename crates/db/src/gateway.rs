use std::str::FromStr;

use futures::{Stream, StreamExt, stream::BoxStream};
use mealweek_shared::{
    mealplan::{Day, DayPlan, MealSlot, WeekPlan, empty_week},
    recipe::{Recipe, seeded},
};
use serde::{Deserialize, Serialize};
use tokio::{
    sync::{mpsc, oneshot},
    task::JoinHandle,
};

use crate::Store;

pub const RECIPES_KEY: &str = "recipes";
pub const WEEK_MEALS_KEY: &str = "week_meals";

/// Flattened day as stored under `week_meals`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DayRecord {
    #[serde(default)]
    pub day: String,
    #[serde(default)]
    pub breakfast: Option<String>,
    #[serde(default)]
    pub lunch: Option<String>,
    #[serde(default)]
    pub dinner: Option<String>,
}

impl From<&DayPlan> for DayRecord {
    fn from(value: &DayPlan) -> Self {
        Self {
            day: value.day.to_string(),
            breakfast: Some(value.breakfast.as_stored().to_owned()),
            lunch: Some(value.lunch.as_stored().to_owned()),
            dinner: Some(value.dinner.as_stored().to_owned()),
        }
    }
}

enum Save {
    Recipes(Vec<Recipe>),
    WeekPlan(WeekPlan),
}

impl Save {
    fn key(&self) -> &'static str {
        match self {
            Self::Recipes(_) => RECIPES_KEY,
            Self::WeekPlan(_) => WEEK_MEALS_KEY,
        }
    }
}

struct PendingSave {
    save: Save,
    done: oneshot::Sender<()>,
}

/// Typed access to the recipe catalog and the week plan entries of a [`Store`].
///
/// Background saves from every clone go through one writer task, so they commit in the
/// order they were issued.
#[derive(Clone)]
pub struct Gateway {
    store: Store,
    saves: mpsc::UnboundedSender<PendingSave>,
}

impl Gateway {
    /// Must be called inside a tokio runtime; starts the background writer.
    pub fn new(store: Store) -> Self {
        let (saves, pending) = mpsc::unbounded_channel();
        tokio::spawn(run_writer(store.clone(), pending));

        Self { store, saves }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Emits the current catalog right away, then again after every store write.
    ///
    /// The stream only ends when the store is gone. Calling it again starts over from the
    /// current value.
    pub fn load_recipes(&self) -> BoxStream<'static, Vec<Recipe>> {
        let store = self.store.clone();
        self.changes()
            .then(move |_| {
                let store = store.clone();
                async move { read_recipes(&store).await }
            })
            .boxed()
    }

    /// Same emission rules as [`Gateway::load_recipes`].
    pub fn load_week_plan(&self) -> BoxStream<'static, WeekPlan> {
        let store = self.store.clone();
        self.changes()
            .then(move |_| {
                let store = store.clone();
                async move { read_week_plan(&store).await }
            })
            .boxed()
    }

    pub async fn read_recipes(&self) -> Vec<Recipe> {
        read_recipes(&self.store).await
    }

    pub async fn read_week_plan(&self) -> WeekPlan {
        read_week_plan(&self.store).await
    }

    /// Writes immediately, outside the background queue.
    pub async fn save_recipes(&self, recipes: &[Recipe]) -> mealweek_shared::Result<()> {
        write_recipes(&self.store, recipes).await
    }

    /// Writes immediately, outside the background queue.
    pub async fn save_week_plan(&self, plan: &WeekPlan) -> mealweek_shared::Result<()> {
        write_week_plan(&self.store, plan).await
    }

    /// Queues a save. The handle finishes once this save and every save queued before it
    /// have been attempted; it can be dropped. A failure is only logged.
    pub fn spawn_save_recipes(&self, recipes: Vec<Recipe>) -> JoinHandle<()> {
        self.enqueue(Save::Recipes(recipes))
    }

    /// Queues a save with the same ordering as [`Gateway::spawn_save_recipes`].
    pub fn spawn_save_week_plan(&self, plan: WeekPlan) -> JoinHandle<()> {
        self.enqueue(Save::WeekPlan(plan))
    }

    fn enqueue(&self, save: Save) -> JoinHandle<()> {
        let key = save.key();
        let (done, attempted) = oneshot::channel();

        if self.saves.send(PendingSave { save, done }).is_err() {
            tracing::error!(key, "save queue closed, save dropped");
        }

        tokio::spawn(async move {
            let _ = attempted.await;
        })
    }

    fn changes(&self) -> impl Stream<Item = ()> + Send + use<> {
        let rx = self.store.subscribe();

        futures::stream::unfold((rx, true), |(mut rx, first)| async move {
            if !first && rx.changed().await.is_err() {
                return None;
            }

            Some(((), (rx, false)))
        })
    }
}

async fn run_writer(store: Store, mut pending: mpsc::UnboundedReceiver<PendingSave>) {
    while let Some(PendingSave { save, done }) = pending.recv().await {
        let result = match &save {
            Save::Recipes(recipes) => write_recipes(&store, recipes).await,
            Save::WeekPlan(plan) => write_week_plan(&store, plan).await,
        };

        if let Err(err) = result {
            tracing::error!(key = save.key(), err = %err, "failed to save store entry");
        }

        let _ = done.send(());
    }
}

async fn read_recipes(store: &Store) -> Vec<Recipe> {
    match store.get(RECIPES_KEY).await {
        Ok(Some(payload)) => decode_recipes(&payload),
        Ok(None) => seeded(),
        Err(err) => {
            tracing::warn!(key = RECIPES_KEY, err = %err, "failed to read store entry");
            seeded()
        }
    }
}

async fn read_week_plan(store: &Store) -> WeekPlan {
    match store.get(WEEK_MEALS_KEY).await {
        Ok(Some(payload)) => decode_week_plan(&payload),
        Ok(None) => empty_week(),
        Err(err) => {
            tracing::warn!(key = WEEK_MEALS_KEY, err = %err, "failed to read store entry");
            empty_week()
        }
    }
}

async fn write_recipes(store: &Store, recipes: &[Recipe]) -> mealweek_shared::Result<()> {
    let payload = serde_json::to_string(recipes)?;
    store.set(RECIPES_KEY, payload).await?;

    tracing::debug!(count = recipes.len(), "recipes saved");

    Ok(())
}

async fn write_week_plan(store: &Store, plan: &WeekPlan) -> mealweek_shared::Result<()> {
    let records = plan.iter().map(DayRecord::from).collect::<Vec<_>>();
    let payload = serde_json::to_string(&records)?;
    store.set(WEEK_MEALS_KEY, payload).await?;

    tracing::debug!("week plan saved");

    Ok(())
}

pub fn decode_recipes(payload: &str) -> Vec<Recipe> {
    match serde_json::from_str::<Vec<Recipe>>(payload) {
        Ok(recipes) if !recipes.is_empty() => recipes,
        Ok(_) => seeded(),
        Err(err) => {
            tracing::warn!(key = RECIPES_KEY, err = %err, "unreadable recipes, using defaults");
            seeded()
        }
    }
}

/// Rebuilds the week from flattened records. Records are matched to weekdays by label, so
/// the result always has seven days in order; unknown labels are ignored and missing days
/// stay unset.
pub fn decode_week_plan(payload: &str) -> WeekPlan {
    let records = match serde_json::from_str::<Vec<DayRecord>>(payload) {
        Ok(records) => records,
        Err(err) => {
            tracing::warn!(
                key = WEEK_MEALS_KEY,
                err = %err,
                "unreadable week plan, using empty week"
            );
            return empty_week();
        }
    };

    let mut week = empty_week();
    for record in records {
        let Ok(day) = Day::from_str(&record.day) else {
            tracing::debug!(day = %record.day, "skipping unknown day");
            continue;
        };

        week[day.index()] = DayPlan {
            day,
            breakfast: MealSlot::from_stored(record.breakfast.as_deref()),
            lunch: MealSlot::from_stored(record.lunch.as_deref()),
            dinner: MealSlot::from_stored(record.dinner.as_deref()),
        };
    }

    week
}
