use mealweek_recipe::{AddRecipeInput, Catalog, Recipe, seeded};
use temp_dir::TempDir;

mod helpers;

#[tokio::test]
async fn test_add_recipe() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let catalog = Catalog::new(state.gateway.clone(), seeded());

    catalog
        .add_recipe(AddRecipeInput::new(
            "Crepes",
            "Thin pancakes",
            "500",
            "Egg, Milk,  , Flour",
        ))
        .await?
        .await?;

    assert_eq!(catalog.len().await, 4);

    let recipes = catalog.all().await;
    assert_eq!(
        recipes.last().unwrap(),
        &Recipe::new("Crepes", "Thin pancakes", 500, ["Egg", "Milk", "Flour"])
    );
    assert_eq!(state.gateway.read_recipes().await, recipes);

    Ok(())
}

#[tokio::test]
async fn test_add_recipe_blank_name() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let catalog = Catalog::new(state.gateway.clone(), seeded());

    let err = catalog
        .add_recipe(AddRecipeInput::new(" ", "Nothing", "10", "Air"))
        .await
        .unwrap_err();

    assert!(err.is_validation());
    assert_eq!(catalog.all().await, seeded());
    assert_eq!(state.gateway.store().revision(), 0);

    Ok(())
}

#[tokio::test]
async fn test_duplicate_names_and_lookup() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let catalog = Catalog::new(state.gateway.clone(), seeded());

    let _ = catalog
        .add_recipe(AddRecipeInput::new("Pancakes", "Second batch", "", ""))
        .await?;

    assert_eq!(catalog.len().await, 4);

    let found = catalog.find_by_name("Pancakes").await.unwrap();
    assert_eq!(found.description, "Fluffy pancakes with syrup and butter");
    assert!(catalog.find_by_name("pancakes").await.is_none());
    assert!(catalog.find_by_name("Ghost Dish").await.is_none());

    Ok(())
}

#[tokio::test]
async fn test_replace() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let catalog = Catalog::new(state.gateway.clone(), seeded());

    let recipes = vec![Recipe::new("Soup", "", 90, ["Leek"])];
    catalog.replace(recipes.clone()).await;

    assert_eq!(catalog.all().await, recipes);
    assert!(!catalog.is_empty().await);

    Ok(())
}
