use clap::ValueEnum;
use notehub_catalog::Aspect;

#[derive(Copy, Clone, ValueEnum)]
pub(crate) enum AspectFlag {
    Properties,
    Status,
    Ownership,
    Schema,
    Browse,
    Domain,
}

impl AspectFlag {
    pub(crate) const fn as_domain(self) -> Aspect {
        match self {
            AspectFlag::Properties => Aspect::Properties,
            AspectFlag::Status => Aspect::Status,
            AspectFlag::Ownership => Aspect::Ownership,
            AspectFlag::Schema => Aspect::Schema,
            AspectFlag::Browse => Aspect::Browse,
            AspectFlag::Domain => Aspect::Domain,
        }
    }
}
