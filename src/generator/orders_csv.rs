//! Order history export.

use super::format::{format_decimal, format_money, format_size_m};
use crate::error::Result;
use crate::model::OrderRecord;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// Timestamp layout in the history file.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Header row written for order history files.
pub const ORDER_HEADER: [&str; 13] = [
    "OS",
    "Cliente",
    "Descricao_Pedido",
    "Valor_Pedido_Total_R$",
    "Dimensao_Corte_LxC_m",
    "Quantidade_Caixas",
    "Modelo_Chapa_Pedido",
    "Tipo_Papel_Pedido",
    "Gramatura_Pedido",
    "Chapas_Consumidas",
    "Retalhos_Gerados_Dimensoes",
    "Peso_Total_Pedido_kg",
    "Data_Processamento",
];

fn order_fields(record: &OrderRecord) -> [String; 13] {
    [
        record.order_ref.clone(),
        record.customer.clone(),
        record.description.clone(),
        format_money(record.order_value),
        format_size_m(record.cut_width, record.cut_length),
        record.quantity.to_string(),
        record.stock_model.clone(),
        record.paper_type.clone(),
        format_decimal(record.basis_weight),
        record.sheets_consumed.to_string(),
        record.remnant_description(),
        format_decimal(record.finished_weight_kg),
        record.timestamp.format(TIMESTAMP_FORMAT).to_string(),
    ]
}

/// Write order records, optionally preceded by the header row.
pub fn write_orders_csv<W: Write>(
    writer: W,
    records: &[OrderRecord],
    with_header: bool,
) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_writer(writer);

    if with_header {
        csv_writer.write_record(ORDER_HEADER)?;
    }

    for record in records {
        csv_writer.write_record(order_fields(record))?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Append order records to a history file, writing the header if the file is new or empty.
pub fn append_orders_file(path: &Path, records: &[OrderRecord]) -> Result<()> {
    let needs_header = std::fs::metadata(path).map(|m| m.len() == 0).unwrap_or(true);
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    write_orders_csv(file, records, needs_header)
}
