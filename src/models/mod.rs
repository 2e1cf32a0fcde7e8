pub mod cashflow;
pub mod kategori;
pub mod statistik;
