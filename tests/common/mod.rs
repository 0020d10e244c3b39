// tests/common/mod.rs

//! Shared test utilities and helpers for integration tests.

#![allow(dead_code)]

use chomp_recipes::db;
use chomp_recipes::recipes::{RecipeIngredientRequest, RecipeRequest, RecipeService};
use chomp_recipes::{
    EntityKind, Error, IngredientCatalog, IngredientProjection, LookupKey, RecipeDuration, Result,
    UserDirectory, UserProjection,
};
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// In-memory user service that counts its lookups
#[derive(Default)]
pub struct FakeUsers {
    users: Mutex<Vec<UserProjection>>,
    by_id: AtomicUsize,
    by_email: AtomicUsize,
}

impl FakeUsers {
    pub fn add(&self, id: &str, email: &str, name: &str, image: Option<&str>) {
        self.users.lock().unwrap().push(UserProjection {
            id: id.to_string(),
            email: email.to_string(),
            name: name.to_string(),
            image: image.map(str::to_string),
        });
    }

    pub fn remove(&self, id: &str) {
        self.users.lock().unwrap().retain(|u| u.id != id);
    }

    pub fn id_lookups(&self) -> usize {
        self.by_id.load(Ordering::SeqCst)
    }

    pub fn email_lookups(&self) -> usize {
        self.by_email.load(Ordering::SeqCst)
    }

    pub fn reset_counts(&self) {
        self.by_id.store(0, Ordering::SeqCst);
        self.by_email.store(0, Ordering::SeqCst);
    }
}

impl UserDirectory for FakeUsers {
    fn user_by_id(&self, id: &str) -> Result<UserProjection> {
        self.by_id.fetch_add(1, Ordering::SeqCst);
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or_else(|| Error::not_found(EntityKind::User, id))
    }

    fn user_by_email(&self, email: &str) -> Result<UserProjection> {
        self.by_email.fetch_add(1, Ordering::SeqCst);
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned()
            .ok_or_else(|| Error::NotFound {
                kind: EntityKind::User,
                key: LookupKey::Email(email.to_string()),
            })
    }
}

/// In-memory ingredient service that counts its lookups
#[derive(Default)]
pub struct FakeCatalog {
    ingredients: Mutex<HashMap<String, IngredientProjection>>,
    broken: Mutex<HashSet<String>>,
    lookups: AtomicUsize,
}

impl FakeCatalog {
    pub fn add(&self, id: &str, name: &str, units: &[&str]) {
        self.ingredients.lock().unwrap().insert(
            id.to_string(),
            IngredientProjection {
                id: id.to_string(),
                name: name.to_string(),
                units: units.iter().map(|u| u.to_string()).collect(),
            },
        );
    }

    pub fn remove(&self, id: &str) {
        self.ingredients.lock().unwrap().remove(id);
    }

    /// Make lookups of `id` fail as if the service were down
    pub fn break_lookup(&self, id: &str) {
        self.broken.lock().unwrap().insert(id.to_string());
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    pub fn reset_counts(&self) {
        self.lookups.store(0, Ordering::SeqCst);
    }
}

impl IngredientCatalog for FakeCatalog {
    fn ingredient(&self, id: &str) -> Result<IngredientProjection> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if self.broken.lock().unwrap().contains(id) {
            return Err(Error::TransientFailure(format!("HTTP 503 for ingredient {id}")));
        }
        self.ingredients
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or_else(|| Error::not_found(EntityKind::Ingredient, id))
    }
}

/// A recipe service over a fresh database and fake owning services
///
/// Keep the struct alive for the duration of the test; dropping it removes
/// the database.
pub struct TestKitchen {
    _temp_dir: TempDir,
    pub db_path: PathBuf,
    pub users: Arc<FakeUsers>,
    pub catalog: Arc<FakeCatalog>,
    pub service: Arc<RecipeService>,
}

/// Kitchen with one chef (`u1`, chef@example.com) and flour, eggs and milk
pub fn setup_kitchen() -> TestKitchen {
    let temp_dir = tempfile::tempdir().unwrap();
    let db_path = temp_dir.path().join("recipes.db");
    db::init(&db_path).unwrap();

    let users = Arc::new(FakeUsers::default());
    users.add("u1", "chef@example.com", "Chef", Some("img.png"));

    let catalog = Arc::new(FakeCatalog::default());
    catalog.add("flourId", "Flour", &["g", "kg"]);
    catalog.add("eggsId", "Eggs", &["piece"]);
    catalog.add("milkId", "Milk", &["ml", "l"]);

    let service = Arc::new(RecipeService::new(db_path.clone(), users.clone(), catalog.clone()).unwrap());

    TestKitchen {
        _temp_dir: temp_dir,
        db_path,
        users,
        catalog,
        service,
    }
}

pub fn line(ingredient_ref: &str, quantity: f64, unit: &str) -> RecipeIngredientRequest {
    RecipeIngredientRequest {
        ingredient_ref: ingredient_ref.to_string(),
        quantity,
        unit: unit.to_string(),
    }
}

/// The canonical pancakes request: 200 g flour, Mix then Fry, for four
pub fn pancakes() -> RecipeRequest {
    RecipeRequest {
        name: "Pancakes".to_string(),
        duration: RecipeDuration::parse("PT30M").unwrap(),
        amount_of_people: 4,
        description: Some("Simple".to_string()),
        instructions: vec!["Mix".to_string(), "Fry".to_string()],
        ingredients: vec![line("flourId", 200.0, "g")],
    }
}
