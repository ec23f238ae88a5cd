pub mod membership;
pub mod tenant;

pub use membership::MembershipRepository;
pub use tenant::TenantRepository;
