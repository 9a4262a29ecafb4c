mod belongs_to;
pub use belongs_to::BelongsTo;

mod has_one;
pub use has_one::HasOne;

mod has_many;
pub use has_many::HasMany;

mod many_to_many;
pub use many_to_many::ManyToMany;
