//! The fixed showcase order. Every value is constant except the order number.

use image::RgbImage;

use super::{GenerationContext, Locale};
use crate::canvas::{rgb, Color, Rect, BLACK, WHITE};
use crate::layout::{centered_title, FieldList, Table, LABEL, MUTED};
use crate::model::{NumberedProduct, OrderRecord, SampleOrder};
use crate::money::{round2, sum_cents};

const WIDTH: u32 = 900;
const HEIGHT: u32 = 800;
const SHIPPING_FEE: f64 = 0.0;
const ORDER_DATE: &str = "2026-01-26 10:30:00";
const PHONE: &str = "138-0000-1234";

const BANNER: Color = rgb(70, 130, 180);
const ALERT: Color = rgb(220, 20, 60);

/// English name, Chinese name, unit price and quantity.
const PRODUCTS: [(&str, &str, f64, u32); 5] = [
    ("iPhone 15 Pro Max 256GB Deep Purple", "iPhone 15 Pro Max 256GB 深紫色", 9999.0, 1),
    ("AirPods Pro 2nd Generation", "AirPods Pro 第二代", 1999.0, 1),
    ("MacBook Pro 14-inch M3 Chip", "MacBook Pro 14英寸 M3芯片", 15999.0, 1),
    ("iPad Air 11-inch Wi-Fi 256GB", "iPad Air 11英寸 Wi-Fi 256GB", 4599.0, 2),
    ("Magic Mouse Wireless", "Magic Mouse 无线鼠标", 649.0, 1),
];

struct Header {
    customer_name: &'static str,
    delivery_address: &'static str,
    shipping_method: &'static str,
    payment_method: &'static str,
    status: &'static str,
}

fn header(locale: Locale) -> Header {
    match locale {
        Locale::English => Header {
            customer_name: "Mr. Zhang",
            delivery_address: "123 Somewhere Street, Chaoyang District, Beijing",
            shipping_method: "Standard Shipping",
            payment_method: "Alipay",
            status: "Pending Shipment",
        },
        Locale::Chinese => Header {
            customer_name: "张先生",
            delivery_address: "北京市朝阳区某街某号",
            shipping_method: "标准配送",
            payment_method: "支付宝",
            status: "待发货",
        },
    }
}

pub fn generate(order_id: &str, ctx: &mut GenerationContext) -> (RgbImage, OrderRecord) {
    let locale = ctx.locale;
    let header = header(locale);

    let products: Vec<NumberedProduct> = PRODUCTS
        .iter()
        .enumerate()
        .map(|(index, (english, chinese, unit_price, quantity))| NumberedProduct {
            item_no: (index + 1).to_string(),
            product_name: locale.text(english, chinese).to_owned(),
            unit_price: *unit_price,
            quantity: *quantity,
            subtotal: round2(unit_price * f64::from(*quantity)),
        })
        .collect();
    let items_total = sum_cents(products.iter().map(|p| p.subtotal));
    let order_total = sum_cents([items_total, SHIPPING_FEE]);

    let currency = locale.currency();
    let width = WIDTH as i32;
    let mut canvas = ctx.canvas(WIDTH, HEIGHT);

    canvas.rect(Rect::band(WIDTH, 0, 60), Some(BANNER), Some(BANNER), 1);
    canvas.text(
        30,
        18,
        locale.text("My Store - Order System", "我的店铺 - 订单系统"),
        20.0,
        WHITE,
    );
    centered_title(&mut canvas, 80, locale.text("ORDER DETAILS", "订单详情"), 28.0, BLACK);
    canvas.line((50, 130), (width - 50, 130), MUTED);

    let info = [
        (locale.text("Order No.:", "订单号:"), order_id),
        (locale.text("Customer Name:", "客户姓名:"), header.customer_name),
        (locale.text("Phone Number:", "联系电话:"), PHONE),
        (locale.text("Delivery Address:", "收货地址:"), header.delivery_address),
        (locale.text("Order Date:", "下单时间:"), ORDER_DATE),
        (locale.text("Shipping Method:", "配送方式:"), header.shipping_method),
        (locale.text("Payment Method:", "支付方式:"), header.payment_method),
        (locale.text("Order Status:", "订单状态:"), header.status),
    ];
    let mut y = FieldList::new(70, 220, 35)
        .with_stripes(50, width - 50, rgb(245, 245, 245), WHITE)
        .draw(&mut canvas, 150, &info);

    y += 30;
    let table = Table::new(50, width - 50, 70, &[60, 380, 120, 80])
        .with_header(40, rgb(230, 240, 250), rgb(30, 30, 30))
        .with_header_outline(MUTED)
        .with_header_size(18.0)
        .with_row_height(40)
        .with_stripes(rgb(250, 250, 250), WHITE)
        .with_border(Some(rgb(200, 200, 200)))
        .with_text(BLACK, 16.0);
    y = table.draw_header(
        &mut canvas,
        y,
        &[
            locale.text("No.", "序号"),
            locale.text("Product Name", "商品名称"),
            locale.text("Unit Price", "单价"),
            locale.text("Qty", "数量"),
            locale.text("Subtotal", "小计"),
        ],
    );
    let rows: Vec<Vec<String>> = products
        .iter()
        .map(|p| {
            vec![
                p.item_no.clone(),
                p.product_name.clone(),
                currency.grouped(p.unit_price),
                p.quantity.to_string(),
                currency.grouped(p.subtotal),
            ]
        })
        .collect();
    y = table.draw_rows(&mut canvas, y, &rows) + 20;

    canvas.line((50, y - 10), (width - 50, y - 10), MUTED);
    let totals = [
        (locale.text("Items Total:", "商品合计:"), currency.grouped(items_total)),
        (locale.text("Shipping Fee:", "运费:"), currency.grouped(SHIPPING_FEE)),
        (locale.text("Order Total:", "订单总计:"), currency.grouped(order_total)),
    ];
    y = FieldList::new(width - 250, width - 120, 35)
        .with_colors(LABEL, BLACK)
        .draw(&mut canvas, y, &totals);

    y += 15;
    canvas.text(
        width - 300,
        y,
        &format!(
            "{} {}",
            locale.text("Amount Due:", "应付金额:"),
            currency.grouped(order_total)
        ),
        24.0,
        ALERT,
    );

    y += 60;
    let (note, thanks) = match locale {
        Locale::English => (
            "Note: Contact customer service at 400-123-4567 if you have any questions",
            "Thank you for your purchase, wish you a pleasant life!",
        ),
        Locale::Chinese => (
            "备注: 如有问题请联系客服 400-123-4567",
            "感谢您的购买，祝您生活愉快！",
        ),
    };
    canvas.text(70, y, note, 16.0, MUTED);
    canvas.text(70, y + 25, thanks, 16.0, MUTED);

    let record = SampleOrder {
        order_no: order_id.to_owned(),
        customer_name: header.customer_name.to_owned(),
        phone: PHONE.to_owned(),
        delivery_address: header.delivery_address.to_owned(),
        order_date: ORDER_DATE.to_owned(),
        shipping_method: header.shipping_method.to_owned(),
        payment_method: header.payment_method.to_owned(),
        status: header.status.to_owned(),
        products,
        items_total,
        shipping_fee: SHIPPING_FEE,
        order_total,
    };

    (canvas.finish(), OrderRecord::Sample(record))
}
