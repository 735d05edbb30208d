//! Plain-text views

use brewdesk::{cart::CartLineItem, pricing};
use brewdesk_app::domain::{
    dashboards::{AdminOverview, BaristaQueues, TrackedOrder},
    menu::models::{Addon, Category, MenuItem},
    orders::models::{Order, OrderStatus},
};
use jiff::tz::TimeZone;
use rust_decimal::Decimal;
use rusty_money::iso;

pub(crate) fn amount(value: Decimal) -> String {
    pricing::format_amount(value, iso::PHP).unwrap_or_else(|_error| format!("PHP {value}"))
}

pub(crate) fn order(order: &Order) -> String {
    let placed = order
        .created_at
        .to_zoned(TimeZone::system())
        .strftime("%H:%M");

    let mut lines = vec![format!(
        "#{}  {}  {} ({})  {} / {}  {}  {placed}",
        order.number(),
        order.status.label(),
        order.customer_name,
        order.customer_phone,
        order.order_type.label(),
        order.payment_method.label(),
        amount(order.total_amount),
    )];

    for item in &order.items {
        lines.push(format!(
            "    {} x {}  {}",
            item.quantity,
            item.name.as_deref().unwrap_or("(removed item)"),
            amount(item.subtotal),
        ));

        for addon in &item.addons {
            lines.push(format!(
                "        + {}",
                addon.name.as_deref().unwrap_or("(removed add-on)")
            ));
        }

        if let Some(notes) = &item.notes {
            lines.push(format!("        note: {notes}"));
        }
    }

    lines.push(format!("    id: {}", order.uuid));

    lines.join("\n")
}

fn section(title: &str, orders: &[Order]) -> String {
    if orders.is_empty() {
        return format!("{title} (0)\n    nothing here");
    }

    let body: Vec<String> = orders.iter().map(order).collect();

    format!("{title} ({})\n{}", orders.len(), body.join("\n"))
}

pub(crate) fn pending(orders: &[Order]) -> String {
    section("Pending orders", orders)
}

pub(crate) fn barista(queues: &BaristaQueues) -> String {
    format!(
        "{}\n\n{}",
        section("In progress", &queues.in_progress),
        section("Ready for pickup", &queues.ready)
    )
}

/// Status line plus the step progression, e.g. `Pending > [Accepted] > ...`.
pub(crate) fn progress(status: OrderStatus) -> String {
    if status == OrderStatus::Cancelled {
        return "This order was cancelled".to_string();
    }

    let steps: Vec<String> = OrderStatus::PROGRESSION
        .iter()
        .map(|step| {
            if *step == status {
                format!("[{}]", step.label())
            } else {
                step.label().to_string()
            }
        })
        .collect();

    steps.join(" > ")
}

pub(crate) fn tracked(tracked: &TrackedOrder) -> String {
    match tracked {
        TrackedOrder::Found(found) => format!("{}\n{}", progress(found.status), order(found)),
        TrackedOrder::NotFound => "Order not found".to_string(),
    }
}

pub(crate) fn menu_item(item: &MenuItem) -> String {
    let availability = if item.is_available { "" } else { "  (hidden)" };

    format!(
        "{}  {}{availability}\n    id: {}",
        item.name,
        amount(item.base_price),
        item.uuid
    )
}

pub(crate) fn categories(categories: &[Category]) -> String {
    let lines: Vec<String> = categories
        .iter()
        .map(|category| format!("{}  ({})", category.name, category.slug))
        .collect();

    lines.join("\n")
}

pub(crate) fn addons(addons: &[Addon]) -> String {
    let lines: Vec<String> = addons
        .iter()
        .map(|addon| format!("+ {}  {}\n    id: {}", addon.name, amount(addon.price), addon.uuid))
        .collect();

    lines.join("\n")
}

pub(crate) fn overview(overview: &AdminOverview) -> String {
    let stats = &overview.stats;

    let mut lines = vec![
        format!("Total sales:  {}", amount(stats.total_sales)),
        format!("Total orders: {}", stats.total_orders),
        format!("Today:        {}", amount(stats.today_sales)),
        String::new(),
        format!("Recent transactions ({})", overview.recent.len()),
    ];

    lines.extend(overview.recent.iter().map(|recent| {
        format!(
            "    #{}  {}  {}  {}",
            recent.number(),
            recent.status.label(),
            recent.customer_name,
            amount(recent.total_amount)
        )
    }));

    lines.push(String::new());
    lines.push(format!("Menu ({} items)", overview.menu.len()));

    for category in &overview.categories {
        lines.push(format!("  {}", category.name));

        lines.extend(
            overview
                .menu
                .iter()
                .filter(|item| item.category_uuid == category.uuid)
                .map(|item| format!("    {}", menu_item(item).replace('\n', "\n    "))),
        );
    }

    lines.join("\n")
}

pub(crate) fn cart(items: &[CartLineItem]) -> String {
    if items.is_empty() {
        return "Your cart is empty".to_string();
    }

    let mut lines = Vec::with_capacity(items.len() * 2 + 2);

    for item in items {
        lines.push(format!(
            "{} x {}  {}",
            item.quantity,
            item.name,
            amount(item.line_total())
        ));

        for addon in &item.addons {
            lines.push(format!("    + {}  {}", addon.name, amount(addon.price)));
        }

        if let Some(notes) = &item.notes {
            lines.push(format!("    note: {notes}"));
        }

        lines.push(format!("    line: {}", item.id));
    }

    lines.push(format!(
        "{} items  total {}",
        pricing::total_items(items),
        amount(pricing::total_amount(items))
    ));

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_marks_the_current_step() {
        assert_eq!(
            progress(OrderStatus::Preparing),
            "Order Received > Accepted > [Preparing] > Ready for Pickup > Served"
        );
    }

    #[test]
    fn cancelled_orders_skip_the_progression() {
        assert_eq!(progress(OrderStatus::Cancelled), "This order was cancelled");
    }

    #[test]
    fn missing_orders_say_so() {
        assert_eq!(tracked(&TrackedOrder::NotFound), "Order not found");
    }

    #[test]
    fn empty_carts_say_so() {
        assert_eq!(cart(&[]), "Your cart is empty");
    }
}
