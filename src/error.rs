use crate::content::ContentError;
use crate::dns::DnsError;
use crate::permutate::PermutationError;
use crate::spf::SpfError;
use crate::whois::WhoisError;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    PermutationError(#[from] PermutationError),

    #[error(transparent)]
    DnsError(#[from] DnsError),

    #[error(transparent)]
    WhoisError(#[from] WhoisError),

    #[error(transparent)]
    ContentError(#[from] ContentError),

    #[error(transparent)]
    SpfError(#[from] SpfError),
}
