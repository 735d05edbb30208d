use brewdesk_app::{
    context::AppContext,
    domain::{
        dashboards::AdminDashboard,
        menu::models::{MenuItem, MenuItemForm, MenuItemUuid},
    },
};
use clap::{Args, Subcommand};
use rust_decimal::Decimal;

use crate::cli::{emit, render};

#[derive(Debug, Args)]
pub(crate) struct MenuCommand {
    /// Category slug; lists the items on sale in that category
    #[arg(long)]
    category: Option<String>,

    #[command(subcommand)]
    action: Option<MenuAction>,
}

#[derive(Debug, Subcommand)]
enum MenuAction {
    /// List the add-ons offered with every item
    Addons,

    /// List every item, hidden ones included
    All,

    /// Add a menu item
    Add(ItemFields),

    /// Edit a menu item
    Edit {
        /// Menu item UUID
        #[arg(long)]
        item: MenuItemUuid,

        #[command(flatten)]
        fields: ItemFields,
    },

    /// Put an item back on sale
    Show(ItemArgs),

    /// Take an item off sale
    Hide(ItemArgs),

    /// Delete an item
    Delete(ItemArgs),
}

#[derive(Debug, Args)]
struct ItemArgs {
    /// Menu item UUID
    #[arg(long)]
    item: MenuItemUuid,
}

#[derive(Debug, Args)]
struct ItemFields {
    /// Display name
    #[arg(long)]
    name: Option<String>,

    /// Price before add-ons
    #[arg(long)]
    price: Option<Decimal>,

    /// Category slug
    #[arg(long)]
    category: Option<String>,

    #[arg(long)]
    description: Option<String>,

    #[arg(long)]
    image_url: Option<String>,
}

pub(crate) async fn run(context: &AppContext, command: MenuCommand) -> Result<(), String> {
    let admin = AdminDashboard::new(context.orders.clone(), context.menu.clone());

    match (command.action, command.category) {
        (None, None) => {
            let categories = context
                .menu
                .list_categories()
                .await
                .map_err(|error| format!("failed to list categories: {error}"))?;

            emit(&render::categories(&categories));
        }
        (None, Some(slug)) => {
            let items = context
                .menu
                .available_items_in_category(&slug)
                .await
                .map_err(|error| format!("failed to list items in {slug}: {error}"))?;

            list(&items);
        }
        (Some(MenuAction::Addons), _) => {
            let addons = context
                .menu
                .list_addons()
                .await
                .map_err(|error| format!("failed to list add-ons: {error}"))?;

            emit(&render::addons(&addons));
        }
        (Some(MenuAction::All), slug) => {
            let category = match slug {
                Some(slug) => Some(
                    context
                        .menu
                        .category_by_slug(&slug)
                        .await
                        .map_err(|error| format!("failed to find category {slug}: {error}"))?
                        .uuid,
                ),
                None => None,
            };

            let items = context
                .menu
                .list_items(category)
                .await
                .map_err(|error| format!("failed to list items: {error}"))?;

            list(&items);
        }
        (Some(MenuAction::Add(fields)), _) => {
            let form = form(context, fields, None).await?;

            let item = admin
                .save_item(form, None)
                .await
                .map_err(|error| format!("failed to add item: {error}"))?;

            emit(&render::menu_item(&item));
        }
        (Some(MenuAction::Edit { item, fields }), _) => {
            let existing = find_item(context, item).await?;
            let form = form(context, fields, Some(&existing)).await?;

            let item = admin
                .save_item(form, Some(item))
                .await
                .map_err(|error| format!("failed to edit item: {error}"))?;

            emit(&render::menu_item(&item));
        }
        (Some(MenuAction::Show(args)), _) => {
            set_available(context, &admin, args.item, true).await?;
        }
        (Some(MenuAction::Hide(args)), _) => {
            set_available(context, &admin, args.item, false).await?;
        }
        (Some(MenuAction::Delete(args)), _) => {
            admin
                .delete_item(args.item)
                .await
                .map_err(|error| format!("failed to delete item: {error}"))?;

            emit(&format!("deleted {}", args.item));
        }
    }

    Ok(())
}

fn list(items: &[MenuItem]) {
    if items.is_empty() {
        emit("no items");
        return;
    }

    let lines: Vec<String> = items.iter().map(render::menu_item).collect();

    emit(&lines.join("\n"));
}

/// Builds the admin form. Fields left out keep the values of `existing`.
async fn form(
    context: &AppContext,
    fields: ItemFields,
    existing: Option<&MenuItem>,
) -> Result<MenuItemForm, String> {
    let category_uuid = match fields.category {
        Some(slug) => Some(
            context
                .menu
                .category_by_slug(&slug)
                .await
                .map_err(|error| format!("failed to find category {slug}: {error}"))?
                .uuid,
        ),
        None => existing.map(|item| item.category_uuid),
    };

    let keep = |value: Option<String>, current: Option<&String>| {
        value.or_else(|| current.cloned()).unwrap_or_default()
    };

    Ok(MenuItemForm {
        name: keep(fields.name, existing.map(|item| &item.name)),
        description: keep(
            fields.description,
            existing.and_then(|item| item.description.as_ref()),
        ),
        base_price: fields.price.or_else(|| existing.map(|item| item.base_price)),
        category_uuid,
        image_url: keep(
            fields.image_url,
            existing.and_then(|item| item.image_url.as_ref()),
        ),
    })
}

async fn find_item(context: &AppContext, uuid: MenuItemUuid) -> Result<MenuItem, String> {
    let items = context
        .menu
        .list_items(None)
        .await
        .map_err(|error| format!("failed to list items: {error}"))?;

    items
        .into_iter()
        .find(|item| item.uuid == uuid)
        .ok_or_else(|| format!("menu item {uuid} not found"))
}

async fn set_available(
    context: &AppContext,
    admin: &AdminDashboard,
    uuid: MenuItemUuid,
    available: bool,
) -> Result<(), String> {
    let item = find_item(context, uuid).await?;

    let item = if item.is_available == available {
        item
    } else {
        admin
            .toggle_availability(&item)
            .await
            .map_err(|error| format!("failed to update item: {error}"))?
    };

    emit(&render::menu_item(&item));

    Ok(())
}
