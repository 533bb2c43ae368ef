//! Repository implementations for all Arsip Hub entities.

pub mod archive;
pub mod handover;
pub mod loan;
pub mod user;

pub use archive::ArchiveRepository;
pub use handover::HandoverRepository;
pub use loan::LoanRepository;
pub use user::UserRepository;
