use std::path::Path;

use brewdesk::{
    cart::{CartStore, LineItemId},
    storage::FileStore,
};
use brewdesk_app::{
    context::AppContext,
    domain::menu::{
        customise::Customisation,
        models::{AddonUuid, MenuItemUuid},
    },
};
use clap::{Args, Subcommand};
use tracing::debug;

use crate::cli::{emit, render};

#[derive(Debug, Args)]
pub(crate) struct CartCommand {
    #[command(subcommand)]
    action: Option<CartAction>,
}

#[derive(Debug, Subcommand)]
enum CartAction {
    /// Show the cart (default)
    Show,

    /// Customise a menu item and add it to the cart
    Add(AddArgs),

    /// Change a line's quantity; zero or less removes it
    #[command(allow_negative_numbers = true)]
    Set {
        /// Line id, as shown by `cart show`
        line: String,

        quantity: i32,
    },

    /// Remove a line
    Remove {
        /// Line id, as shown by `cart show`
        line: String,
    },

    /// Empty the cart
    Clear,
}

#[derive(Debug, Args)]
struct AddArgs {
    /// Menu item UUID
    #[arg(long)]
    item: MenuItemUuid,

    /// Add-on UUID; repeat for several add-ons
    #[arg(long = "addon")]
    addons: Vec<AddonUuid>,

    #[arg(long, default_value_t = 1)]
    quantity: u32,

    /// Special instructions for the barista
    #[arg(long)]
    notes: Option<String>,
}

pub(crate) async fn run(
    context: &AppContext,
    data_dir: &Path,
    command: CartCommand,
) -> Result<(), String> {
    let mut cart = CartStore::open(FileStore::new(data_dir));

    match command.action.unwrap_or(CartAction::Show) {
        CartAction::Show => {}
        CartAction::Add(args) => add(context, &mut cart, args).await?,
        CartAction::Set { line, quantity } => {
            let line = LineItemId::from(line);

            if cart.get(&line).is_none() {
                return Err(format!("no line {line} in the cart"));
            }

            cart.update_quantity(&line, quantity);
        }
        CartAction::Remove { line } => cart.remove_item(&LineItemId::from(line)),
        CartAction::Clear => cart.clear(),
    }

    emit(&render::cart(cart.items()));

    Ok(())
}

async fn add(
    context: &AppContext,
    cart: &mut CartStore<FileStore>,
    args: AddArgs,
) -> Result<(), String> {
    let items = context
        .menu
        .list_items(None)
        .await
        .map_err(|error| format!("failed to load the menu: {error}"))?;

    let item = items
        .iter()
        .find(|item| item.uuid == args.item)
        .filter(|item| item.is_available)
        .ok_or_else(|| format!("menu item {} is not on sale", args.item))?;

    let catalogue = context
        .menu
        .list_addons()
        .await
        .map_err(|error| format!("failed to load add-ons: {error}"))?;

    let mut customisation = Customisation::new(item, &catalogue);

    for addon in args.addons {
        if !catalogue.iter().any(|entry| entry.uuid == addon) {
            return Err(format!("unknown add-on {addon}"));
        }

        if !customisation.is_selected(addon) {
            customisation.toggle_addon(addon);
        }
    }

    customisation.set_quantity(args.quantity);

    if let Some(notes) = args.notes {
        customisation.set_notes(notes);
    }

    debug!(
        item = %item.uuid,
        total = %customisation.preview_total(),
        "adding customised item to cart"
    );

    cart.add_item(customisation.to_line_item());

    Ok(())
}
