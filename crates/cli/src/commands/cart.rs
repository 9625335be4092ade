//! Offline cart simulation.
//!
//! Replays actions against an empty cart using the same transitions as the
//! storefront, logging the recomputed view after each step.

use std::path::PathBuf;

use comic_cart_core::{Cart, CartAction, CartError, CartView, Catalog, Outcome, ProductId};
use thiserror::Error;
use tracing::{info, warn};

/// Errors produced while parsing an action argument.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionParseError {
    #[error("unknown action '{0}' (expected add:<id>, set:<id>=<qty>, remove:<id> or checkout)")]
    UnknownVerb(String),
    #[error("invalid product id in '{0}'")]
    InvalidId(String),
    #[error("missing quantity in '{0}' (expected set:<id>=<qty>)")]
    MissingQuantity(String),
}

/// Parse one action argument.
///
/// The quantity of `set:` is passed to the cart unparsed, so `set:1=abc` is
/// accepted here and ignored by the cart.
///
/// # Errors
///
/// Returns `ActionParseError` for an unknown verb, a non-numeric id, or a
/// `set:` without `=`.
pub fn parse_action(arg: &str) -> Result<CartAction, ActionParseError> {
    let arg = arg.trim();
    if arg.eq_ignore_ascii_case("checkout") {
        return Ok(CartAction::Checkout);
    }

    let (verb, rest) = arg
        .split_once(':')
        .ok_or_else(|| ActionParseError::UnknownVerb(arg.to_string()))?;
    let product_id = |raw: &str| {
        raw.parse::<ProductId>()
            .map_err(|_| ActionParseError::InvalidId(arg.to_string()))
    };

    match verb.to_ascii_lowercase().as_str() {
        "add" => Ok(CartAction::Add {
            product_id: product_id(rest)?,
        }),
        "remove" => Ok(CartAction::Remove {
            product_id: product_id(rest)?,
        }),
        "set" => {
            let (id, quantity) = rest
                .split_once('=')
                .ok_or_else(|| ActionParseError::MissingQuantity(arg.to_string()))?;
            Ok(CartAction::SetQuantity {
                product_id: product_id(id)?,
                quantity: quantity.to_string(),
            })
        }
        _ => Err(ActionParseError::UnknownVerb(arg.to_string())),
    }
}

/// Result of one simulated action.
#[derive(Debug)]
pub struct Step {
    pub action: CartAction,
    pub result: Result<Outcome, CartError>,
    pub view: CartView,
}

/// Apply `actions` in order to a fresh cart.
///
/// A rejected action leaves the cart untouched and the replay continues.
#[must_use]
pub fn replay(catalog: &Catalog, actions: &[CartAction]) -> Vec<Step> {
    let mut cart = Cart::new();

    actions
        .iter()
        .map(|action| {
            let result = cart.apply(catalog, action);
            Step {
                action: action.clone(),
                result,
                view: CartView::build(&cart, catalog),
            }
        })
        .collect()
}

/// Replay actions and log each step.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded.
pub fn simulate(
    file: Option<PathBuf>,
    actions: &[CartAction],
) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = super::resolve_catalog(file)?;

    let steps = replay(&catalog, actions);
    for (index, step) in steps.iter().enumerate() {
        let n = index + 1;
        match &step.result {
            Ok(outcome) => {
                info!(
                    step = n,
                    action = ?step.action,
                    outcome = ?outcome,
                    items = step.view.item_count,
                    total = %step.view.total_display,
                    "Applied"
                );
                if let Some(notice) = outcome.notice() {
                    info!(step = n, "Notice: {notice}");
                }
            }
            Err(e) => warn!(step = n, action = ?step.action, "Rejected: {e}"),
        }
    }

    if let Some(last) = steps.last() {
        info!("Final cart");
        for line in &last.view.lines {
            info!("  {} x {} = {}", line.name, line.quantity, line.subtotal);
        }
        info!("  Total: {}", last.view.total_display);
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use comic_cart_storefront::catalog::builtin_catalog;

    use super::*;

    fn actions(args: &[&str]) -> Vec<CartAction> {
        args.iter().map(|a| parse_action(a).unwrap()).collect()
    }

    #[test]
    fn test_parse_action_forms() {
        assert_eq!(
            parse_action("add:1").unwrap(),
            CartAction::Add {
                product_id: ProductId::new(1)
            }
        );
        assert_eq!(
            parse_action("set:2=5").unwrap(),
            CartAction::SetQuantity {
                product_id: ProductId::new(2),
                quantity: "5".to_string()
            }
        );
        assert_eq!(
            parse_action("Remove:3").unwrap(),
            CartAction::Remove {
                product_id: ProductId::new(3)
            }
        );
        assert_eq!(parse_action("checkout").unwrap(), CartAction::Checkout);
    }

    #[test]
    fn test_parse_action_errors() {
        assert!(matches!(
            parse_action("buy:1"),
            Err(ActionParseError::UnknownVerb(_))
        ));
        assert!(matches!(
            parse_action("add:one"),
            Err(ActionParseError::InvalidId(_))
        ));
        assert!(matches!(
            parse_action("set:1"),
            Err(ActionParseError::MissingQuantity(_))
        ));
        assert!(matches!(
            parse_action("nonsense"),
            Err(ActionParseError::UnknownVerb(_))
        ));
    }

    #[test]
    fn test_replay_scenario() {
        let catalog = builtin_catalog().unwrap();
        let steps = replay(
            &catalog,
            &actions(&["add:1", "add:1", "add:2", "set:1=5", "remove:2", "checkout"]),
        );

        let totals: Vec<&str> = steps.iter().map(|s| s.view.total.as_str()).collect();
        assert_eq!(
            totals,
            vec!["5.99", "11.98", "19.47", "37.44", "29.95", "0.00"]
        );
        assert!(matches!(
            steps.last().unwrap().result,
            Ok(Outcome::CheckedOut { items: 5, .. })
        ));
    }

    #[test]
    fn test_replay_continues_after_rejection() {
        let catalog = builtin_catalog().unwrap();
        let steps = replay(&catalog, &actions(&["add:42", "add:3", "set:3=0"]));

        assert!(matches!(
            steps.first().unwrap().result,
            Err(CartError::UnknownProduct(_))
        ));
        assert_eq!(steps.get(1).unwrap().view.total, "6.99");
        assert!(matches!(steps.get(2).unwrap().result, Ok(Outcome::Ignored)));
        assert_eq!(steps.get(2).unwrap().view.total, "6.99");
    }
}
