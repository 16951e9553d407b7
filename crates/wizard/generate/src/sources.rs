//! Corpus generation: build every alternative, select a subset, export.

use crate::blueprints::generate_options;
use crate::config::{GenerateConfig, Subset};
use crate::cover::find_cover;
use crate::error::{GenerateError, GenerateResult};
use rayon::iter::{ParallelBridge, ParallelIterator};
use std::collections::BTreeSet;
use std::path::PathBuf;
use tracing::{debug, info, trace};
use wizard_core::{
    build_generic, print_contract, print_contract_versioned, Contract, GenericOptions,
    LibraryVersions,
};

/// A successfully built alternative.
#[derive(Debug, Clone)]
pub struct GeneratedContract {
    /// Position in the enumeration.
    pub index: usize,
    /// Content address of `options`.
    pub id: String,
    pub options: GenericOptions,
    pub contract: Contract,
}

#[derive(Debug, Clone)]
pub struct GeneratedSource {
    pub id: String,
    pub options: GenericOptions,
    pub source: String,
}

/// BLAKE3 hex digest of the options' JSON serialization.
pub fn content_id(options: &GenericOptions) -> GenerateResult<String> {
    let bytes = serde_json::to_vec(options)?;
    Ok(blake3::hash(&bytes).to_hex().to_string())
}

/// Import paths a contract depends on; the unit of coverage.
pub fn dependency_signature(contract: &Contract) -> BTreeSet<String> {
    contract.import_paths().into_iter().map(str::to_string).collect()
}

fn build_one(index: usize, options: GenericOptions) -> GenerateResult<Option<GeneratedContract>> {
    let id = content_id(&options)?;
    match build_generic(&options) {
        Ok(contract) => {
            if let Err(source) = contract.validate() {
                return Err(GenerateError::Invariant { id, source });
            }
            Ok(Some(GeneratedContract {
                index,
                id,
                options,
                contract,
            }))
        }
        Err(e) => {
            trace!(id = %id, error = %e, "Skipping invalid options");
            Ok(None)
        }
    }
}

/// Build every option struct, skipping invalid combinations. Results keep
/// enumeration order even when built in parallel.
pub fn generate_contracts<I>(options: I, parallel: bool) -> GenerateResult<Vec<GeneratedContract>>
where
    I: Iterator<Item = GenericOptions> + Send,
{
    let built: Vec<Option<GeneratedContract>> = if parallel {
        options
            .enumerate()
            .par_bridge()
            .map(|(index, opts)| build_one(index, opts))
            .collect::<GenerateResult<_>>()?
    } else {
        options
            .enumerate()
            .map(|(index, opts)| build_one(index, opts))
            .collect::<GenerateResult<_>>()?
    };

    let mut contracts: Vec<GeneratedContract> = built.into_iter().flatten().collect();
    if parallel {
        contracts.sort_by_key(|c| c.index);
    }
    debug!(count = contracts.len(), parallel, "Built contracts");
    Ok(contracts)
}

/// Keep everything, or a minimal cover computed separately over
/// upgradeable and non-upgradeable contracts.
pub fn select_subset(contracts: Vec<GeneratedContract>, subset: Subset) -> Vec<GeneratedContract> {
    match subset {
        Subset::All => contracts,
        Subset::MinimalCover => {
            let (upgradeable, plain): (Vec<_>, Vec<_>) = contracts
                .into_iter()
                .partition(|c| c.options.is_upgradeable());
            let signature = |c: &GeneratedContract| dependency_signature(&c.contract);
            let mut selected = find_cover(upgradeable, signature);
            selected.extend(find_cover(plain, signature));
            selected
        }
    }
}

pub fn generate_contract_subset(
    subset: Subset,
    parallel: bool,
) -> GenerateResult<Vec<GeneratedContract>> {
    let contracts = generate_contracts(generate_options(), parallel)?;
    Ok(select_subset(contracts, subset))
}

/// Print a subset, pinning imports when `versions` is given.
pub fn generate_sources(
    subset: Subset,
    parallel: bool,
    versions: Option<&LibraryVersions>,
) -> GenerateResult<Vec<GeneratedSource>> {
    let sources = generate_contract_subset(subset, parallel)?
        .into_iter()
        .map(|c| {
            let source = match versions {
                Some(v) => print_contract_versioned(&c.contract, v),
                None => print_contract(&c.contract),
            };
            GeneratedSource {
                id: c.id,
                options: c.options,
                source,
            }
        })
        .collect();
    Ok(sources)
}

/// Write one `<id>.sol` per selected contract into `config.output_dir`.
/// Returns the written paths in generation order.
pub fn write_generated_sources(config: &GenerateConfig) -> GenerateResult<Vec<PathBuf>> {
    let dir = &config.output_dir;
    std::fs::create_dir_all(dir).map_err(|e| GenerateError::io(dir, e))?;

    let sources = generate_sources(config.subset, config.parallel, config.versions.as_ref())?;
    let mut written = Vec::with_capacity(sources.len());
    for GeneratedSource { id, source, .. } in sources {
        let path = dir.join(format!("{id}.sol"));
        std::fs::write(&path, source).map_err(|e| GenerateError::io(&path, e))?;
        written.push(path);
    }

    info!(
        count = written.len(),
        subset = %config.subset,
        dir = %dir.display(),
        "Generated contracts"
    );
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blueprints::generate_kind_options;
    use wizard_core::{Erc20Options, Kind, Kip17Options};

    #[test]
    fn content_id_is_stable_hex() {
        let opts = GenericOptions::Erc20(Erc20Options::default());
        let id = content_id(&opts).unwrap();
        assert_eq!(id.len(), 64);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(id, content_id(&opts.clone()).unwrap());
        assert_ne!(
            id,
            content_id(&GenericOptions::Erc20(Erc20Options {
                burnable: true,
                ..Default::default()
            }))
            .unwrap()
        );
    }

    #[test]
    fn invalid_options_are_skipped() {
        let options = vec![
            GenericOptions::Kip17(Kip17Options {
                incremental: true,
                ..Default::default()
            }),
            GenericOptions::Kip17(Kip17Options::default()),
        ];
        let built = generate_contracts(options.into_iter(), false).unwrap();
        assert_eq!(built.len(), 1);
        assert_eq!(built[0].index, 1);
    }

    #[test]
    fn parallel_matches_sequential_order() {
        let sequential = generate_contracts(generate_kind_options(Kind::Kip17), false).unwrap();
        let parallel = generate_contracts(generate_kind_options(Kind::Kip17), true).unwrap();
        let ids = |cs: &[GeneratedContract]| cs.iter().map(|c| c.id.clone()).collect::<Vec<_>>();
        assert_eq!(ids(&sequential), ids(&parallel));
        assert!(sequential.windows(2).all(|w| w[0].index < w[1].index));
    }

    #[test]
    fn minimal_cover_keeps_every_dependency_per_partition() {
        let all = generate_contracts(generate_kind_options(Kind::Erc20), false).unwrap();
        let union = |cs: &[GeneratedContract], upgradeable: bool| {
            cs.iter()
                .filter(|c| c.options.is_upgradeable() == upgradeable)
                .flat_map(|c| dependency_signature(&c.contract))
                .collect::<BTreeSet<_>>()
        };
        let cover = select_subset(all.clone(), Subset::MinimalCover);
        assert!(cover.len() < all.len());
        for upgradeable in [true, false] {
            assert_eq!(union(&cover, upgradeable), union(&all, upgradeable));
        }
    }
}
