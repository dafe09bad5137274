use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use smart_meal_planner_rs::catalog::{FoodCatalog, default_catalog};
use smart_meal_planner_rs::config::PlannerConfig;
use smart_meal_planner_rs::error::PlanError;
use smart_meal_planner_rs::models::{
    CostLevel, DietStyle, FoodCategory, FoodItem, Goal, MealType, PlanInput, Sex, WeeklyPlan,
};
use smart_meal_planner_rs::planner::{
    BuildContext, FoodClassifier, FoodRole, KeywordClassifier, MacroTargets, MealRequest,
    NeutralPreferences, VarietyTracker, build_meal, generate_weekly_plan, seeded_noise,
};

fn profile(diet_style: DietStyle, cost_tier: CostLevel, meals_per_day: u8) -> PlanInput {
    PlanInput {
        sex: Sex::Female,
        age: 34,
        weight: 65.0,
        height: 168.0,
        trains: true,
        meals_per_day,
        diet_style,
        cost_tier,
        restrictions: vec![],
        protein_target: None,
        goal: Some(Goal::Maintenance),
        excluded_foods: vec![],
    }
}

fn random_profile(rng: &mut StdRng) -> PlanInput {
    let diets = [
        DietStyle::Omnivore,
        DietStyle::Pescatarian,
        DietStyle::Vegetarian,
        DietStyle::Vegan,
    ];
    let goals = [Goal::Cutting, Goal::Maintenance, Goal::Bulking];
    PlanInput {
        sex: if rng.gen_range(0..2) == 0 { Sex::Male } else { Sex::Female },
        age: rng.gen_range(18..=70),
        weight: rng.gen_range(50.0..=120.0),
        height: rng.gen_range(150.0..=200.0),
        trains: rng.gen_bool(0.5),
        meals_per_day: rng.gen_range(3..=6),
        diet_style: diets[rng.gen_range(0..diets.len())],
        cost_tier: if rng.gen_bool(0.5) { CostLevel::Low } else { CostLevel::Medium },
        restrictions: vec![],
        protein_target: None,
        goal: Some(goals[rng.gen_range(0..goals.len())]),
        excluded_foods: vec![],
    }
}

fn plan_for(p: &PlanInput, seed: &str) -> WeeklyPlan {
    generate_weekly_plan(
        p,
        &default_catalog(),
        &NeutralPreferences,
        &PlannerConfig::default(),
        seed,
    )
    .unwrap()
}

fn meal_names(plan: &WeeklyPlan) -> Vec<String> {
    plan.meals().map(|m| m.name.clone()).collect()
}

#[test]
fn test_week_shape() {
    let plan = plan_for(&profile(DietStyle::Omnivore, CostLevel::Medium, 5), "user-1:2026-W10");
    assert_eq!(plan.days.len(), 7);
    for (i, day) in plan.days.iter().enumerate() {
        assert_eq!(usize::from(day.day), i + 1);
        let slots: Vec<MealType> = day.meals.iter().map(|m| m.meal_type).collect();
        assert_eq!(
            slots,
            vec![MealType::Breakfast, MealType::Lunch, MealType::Dinner, MealType::Snack]
        );
    }
}

#[test]
fn test_low_and_medium_tiers_never_pick_high_cost_foods() {
    let catalog = FoodCatalog::new(default_catalog());
    let mut rng = StdRng::seed_from_u64(7);

    for round in 0..12 {
        let p = random_profile(&mut rng);
        let plan = plan_for(&p, &format!("sweep-{round}"));
        for meal in plan.meals() {
            for food in &meal.foods {
                let item = catalog.get(&food.food_id).unwrap();
                assert!(
                    !item.is_high_cost(),
                    "{} chosen for a {} plan",
                    item.name,
                    p.cost_tier
                );
            }
        }
    }
}

#[test]
fn test_high_tier_selects_high_cost_when_nothing_cheaper_remains() {
    let foods: Vec<FoodItem> = default_catalog()
        .into_iter()
        .filter(|f| f.is_high_cost() || f.category == FoodCategory::Vegetables)
        .collect();
    let request = MealRequest {
        meal_type: MealType::Dinner,
        targets: MacroTargets {
            protein: 40.0,
            carbs: 60.0,
            fat: 20.0,
        },
        available_foods: &foods,
        excluded_foods: &[],
        cost_tier: CostLevel::High,
    };

    let meal = build_meal(&request, &mut BuildContext::new(&NeutralPreferences)).unwrap();
    let protein = &meal.foods[0];
    assert_eq!(protein.category, FoodCategory::Protein);
    assert!(foods.iter().any(|f| f.id == protein.food_id && f.is_high_cost()));

    let low = MealRequest {
        cost_tier: CostLevel::Low,
        ..request
    };
    let err = build_meal(&low, &mut BuildContext::new(&NeutralPreferences)).unwrap_err();
    assert!(matches!(
        err,
        PlanError::UnsatisfiableMeal {
            role: FoodRole::Protein
        }
    ));
}

#[test]
fn test_builder_names_missing_protein_source() {
    let foods: Vec<FoodItem> = default_catalog()
        .into_iter()
        .filter(|f| f.category != FoodCategory::Protein)
        .collect();
    let request = MealRequest {
        meal_type: MealType::Lunch,
        targets: MacroTargets {
            protein: 35.0,
            carbs: 50.0,
            fat: 15.0,
        },
        available_foods: &foods,
        excluded_foods: &[],
        cost_tier: CostLevel::Medium,
    };
    let err = build_meal(&request, &mut BuildContext::new(&NeutralPreferences)).unwrap_err();
    assert!(err.to_string().contains("protein source"));
}

#[test]
fn test_fish_and_red_meat_caps_hold_across_the_week() {
    let config = PlannerConfig::default();
    let classifier = KeywordClassifier;
    let mut rng = StdRng::seed_from_u64(42);

    for round in 0..8 {
        let mut p = random_profile(&mut rng);
        p.diet_style = DietStyle::Omnivore;
        p.cost_tier = CostLevel::High;
        let plan = plan_for(&p, &format!("caps-{round}"));

        let meals_with = |pred: &dyn Fn(&str) -> bool| -> u32 {
            plan.meals()
                .filter(|m| {
                    m.foods
                        .iter()
                        .any(|f| f.category == FoodCategory::Protein && pred(&f.name))
                })
                .count() as u32
        };
        let fish = meals_with(&|n| classifier.is_fish(n));
        let red = meals_with(&|n| classifier.is_red_meat(n));

        assert!(fish <= config.variety.max_fish_per_week, "fish meals {fish}");
        assert!(red <= config.variety.max_red_meat_per_week, "red meat meals {red}");
        assert_eq!(plan.variety.fish_meals, fish);
        assert_eq!(plan.variety.red_meat_meals, red);
    }
}

#[test]
fn test_tracker_blocks_fish_after_cap() {
    let catalog = default_catalog();
    let salmon = catalog.iter().find(|f| f.name == "Salmon fillet").unwrap();
    let hake = catalog.iter().find(|f| f.name == "Frozen hake").unwrap();

    let mut tracker = VarietyTracker::default();
    assert!(tracker.can_use_protein_source(salmon));
    tracker.record_protein_source(salmon);
    tracker.record_protein_source(hake);
    assert!(!tracker.can_use_protein_source(salmon));
    assert!(!tracker.can_use_protein_source(hake));
}

#[test]
fn test_same_seed_same_plan() {
    let p = profile(DietStyle::Omnivore, CostLevel::Low, 4);
    let a = plan_for(&p, "alice:2026-W42");
    let b = plan_for(&p, "alice:2026-W42");
    assert_eq!(a, b);
}

#[test]
fn test_seeds_diverge() {
    assert_eq!(seeded_noise("alice", "x"), seeded_noise("alice", "x"));
    assert_ne!(seeded_noise("alice", "x"), seeded_noise("bob", "x"));

    let p = profile(DietStyle::Omnivore, CostLevel::Medium, 4);
    let first = meal_names(&plan_for(&p, "user-0:week-1"));
    let diverged = (1..10).any(|i| meal_names(&plan_for(&p, &format!("user-{i}:week-1"))) != first);
    assert!(diverged, "every seed produced the same week");
}

#[test]
fn test_diet_styles_respected() {
    let classifier = KeywordClassifier;
    for style in [DietStyle::Pescatarian, DietStyle::Vegetarian, DietStyle::Vegan] {
        let plan = plan_for(&profile(style, CostLevel::Medium, 3), "diet");
        for food in plan.meals().flat_map(|m| m.foods.iter()) {
            assert!(!classifier.is_meat(&food.name), "{style:?} got {}", food.name);
            if style != DietStyle::Pescatarian {
                assert!(!classifier.is_fish(&food.name), "{style:?} got {}", food.name);
            }
            if style == DietStyle::Vegan {
                assert_ne!(food.category, FoodCategory::Dairy);
            }
        }
    }
}

#[test]
fn test_exclusions_are_honoured() {
    let mut p = profile(DietStyle::Omnivore, CostLevel::Medium, 3);
    p.excluded_foods = vec!["chicken".to_string()];
    p.restrictions = vec!["Broccoli".to_string()];
    let plan = plan_for(&p, "excl");
    for food in plan.meals().flat_map(|m| m.foods.iter()) {
        let name = food.name.to_lowercase();
        assert!(!name.contains("chicken"));
        assert!(!name.contains("broccoli"));
    }
}

#[test]
fn test_invalid_profile_is_rejected() {
    let mut p = profile(DietStyle::Omnivore, CostLevel::Medium, 3);
    p.meals_per_day = 9;
    let err = generate_weekly_plan(
        &p,
        &default_catalog(),
        &NeutralPreferences,
        &PlannerConfig::default(),
        "x",
    )
    .unwrap_err();
    assert!(matches!(err, PlanError::InvalidProfile { .. }));
}
