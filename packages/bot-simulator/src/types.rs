use clap::ValueEnum;
use uno_engine::domain::Variant;

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// One JSON object per game plus the CSV summary
    Jsonl,
    /// CSV summary only
    Csv,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum VariantArg {
    Classic,
    Flip,
    NoMercy,
    NoMercyPlus,
}

impl From<VariantArg> for Variant {
    fn from(arg: VariantArg) -> Self {
        match arg {
            VariantArg::Classic => Variant::Classic,
            VariantArg::Flip => Variant::Flip,
            VariantArg::NoMercy => Variant::NoMercy,
            VariantArg::NoMercyPlus => Variant::NoMercyPlus,
        }
    }
}
