use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlanningError {
    /// A MokaPipe manifest covering several runs cannot be routed to one run folder
    #[error(
        "Manifest {manifest} contains more than one run identifier ({}). Split the manifest so that each file \
         covers a single run, then process each file separately.",
        .run_ids.join(", ")
    )]
    MultipleRunIdentifiers { manifest: String, run_ids: Vec<String> },

    /// A destination still carries a placeholder after resolution
    #[error("Destination {destination} still contains an unresolved placeholder")]
    UnresolvedPlaceholder { destination: String },
}
