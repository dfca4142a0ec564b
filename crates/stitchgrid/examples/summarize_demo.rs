use stitchgrid::{GroupListModel, SummaryEngine, SummaryTableModel, TileLayout, ViewTableModel};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let layout = TileLayout::default();
    let parts = layout.demo_dataset(2)?.into_parts();

    let engine = SummaryEngine::new(&parts.missing, &parts.registrations, &parts.links);
    let model = SummaryTableModel::new(GroupListModel::new(parts.groups.clone()), engine);

    let columns = model.column_count();
    let header: Vec<String> = (0..columns).map(|c| model.column_name(c)).collect();
    println!("{}", header.join(" | "));

    for row in 0..model.row_count() {
        let cells: Vec<String> = (0..columns)
            .map(|c| model.value_at(row, c))
            .collect::<Result<_, _>>()?;
        println!("{}", cells.join(" | "));
    }
    Ok(())
}
