use crate::commands::{build_runtime, load_config, CommandResult};
use weatherwear_db::{connect_with_settings, migrations, CatalogSeedDataset, CategorySeedInfo};

pub fn run() -> CommandResult {
    let config = match load_config("seed") {
        Ok(config) => config,
        Err(failure) => return failure,
    };
    let runtime = match build_runtime("seed") {
        Ok(runtime) => runtime,
        Err(failure) => return failure,
    };

    let result = runtime.block_on(async {
        let pool = connect_with_settings(
            &config.database.url,
            config.database.max_connections,
            config.database.timeout_secs,
        )
        .await
        .map_err(|error| ("db_connectivity", error.to_string(), 4u8))?;

        migrations::run_pending(&pool)
            .await
            .map_err(|error| ("migration", error.to_string(), 5u8))?;

        let seed_result = CatalogSeedDataset::load(&pool)
            .await
            .map_err(|error| ("seed_execution", error.to_string(), 5u8))?;

        let verification = CatalogSeedDataset::verify(&pool)
            .await
            .map_err(|error| ("seed_verification", error.to_string(), 6u8))?;

        let run_result = if verification.all_present {
            Ok(seed_result.categories)
        } else {
            let failed_checks = verification
                .checks
                .iter()
                .filter_map(|(check, passed)| (!passed).then_some(*check))
                .collect::<Vec<_>>();
            Err(("seed_verification", verification_failure_message(&failed_checks), 6u8))
        };

        pool.close().await;
        run_result
    });

    match result {
        Ok(categories) => CommandResult::success("seed", summary_message(&categories)),
        Err((error_class, message, exit_code)) => {
            CommandResult::failure("seed", error_class, message, exit_code)
        }
    }
}

fn summary_message(categories: &[CategorySeedInfo]) -> String {
    let lines: Vec<String> = categories
        .iter()
        .map(|info| format!("  - {}: {} {} products", info.category, info.products, info.label))
        .collect();
    format!("demo catalog loaded and verified:\n{}", lines.join("\n"))
}

fn verification_failure_message(failed_checks: &[&str]) -> String {
    if failed_checks.is_empty() {
        "Some seed data failed to load".to_string()
    } else {
        format!("Seed verification failed for checks: {}", failed_checks.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use weatherwear_core::domain::product::ProductCategory;
    use weatherwear_db::CategorySeedInfo;

    use super::{summary_message, verification_failure_message};

    #[test]
    fn verification_error_message_targets_failed_checks() {
        assert_eq!(
            verification_failure_message(&["seed-cold-products", "seed-prices-in-range"]),
            "Seed verification failed for checks: seed-cold-products, seed-prices-in-range"
        );
    }

    #[test]
    fn verification_error_message_falls_back_to_generic_when_no_labels() {
        assert_eq!(verification_failure_message(&[]), "Some seed data failed to load");
    }

    #[test]
    fn summary_lists_each_category() {
        let message = summary_message(&[CategorySeedInfo {
            category: ProductCategory::Hot,
            label: "T-Shirt",
            products: 10,
        }]);
        assert_eq!(message, "demo catalog loaded and verified:\n  - hot: 10 T-Shirt products");
    }
}
