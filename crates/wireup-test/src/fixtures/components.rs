//! Component families used by the shape fixtures.
//!
//! Every component holds its constructor arguments as `Arc`s, in declaration
//! order, so tests can check identity and parameter positions.

use std::sync::Arc;

use wireup_di::{Arguments, DiResult, Injectable, TypeCatalogBuilder, TypeKey};

use crate::doubles::Repository;

macro_rules! component {
	($name:ident { $($field:ident : $ty:ty),+ $(,)? }) => {
		pub struct $name {
			$(pub $field: Arc<$ty>,)+
		}

		impl Injectable for $name {
			fn dependencies() -> Vec<TypeKey> {
				vec![$(TypeKey::of::<$ty>()),+]
			}

			fn construct(args: &mut Arguments<'_>) -> DiResult<Self> {
				Ok(Self {
					$($field: args.next::<$ty>()?,)+
				})
			}
		}
	};
}

macro_rules! register_all {
	($builder:expr; $($name:ident),+ $(,)?) => {{
		let builder: &mut TypeCatalogBuilder = $builder;
		$(builder.insert_injectable::<$name>();)+
	}};
}

// Independent: every component needs only the repository.
component!(Independent01 { repository: dyn Repository });
component!(Independent02 { repository: dyn Repository });
component!(Independent03 { repository: dyn Repository });
component!(Independent04 { repository: dyn Repository });
component!(Independent05 { repository: dyn Repository });
component!(Independent06 { repository: dyn Repository });
component!(Independent07 { repository: dyn Repository });
component!(Independent08 { repository: dyn Repository });
component!(Independent09 { repository: dyn Repository });
component!(Independent10 { repository: dyn Repository });
component!(Independent20 { repository: dyn Repository });

// Wide: repository-backed leaves fanning into one root.
component!(Wide01 { repository: dyn Repository });
component!(Wide02 { repository: dyn Repository });
component!(Wide03 { repository: dyn Repository });
component!(Wide04 { repository: dyn Repository });
component!(Wide05 { repository: dyn Repository });
component!(Wide06 { repository: dyn Repository });
component!(Wide07 { repository: dyn Repository });
component!(Wide08 { repository: dyn Repository });
component!(Wide09 { repository: dyn Repository });
component!(Wide10 { repository: dyn Repository });
component!(Wide11 { repository: dyn Repository });
component!(Wide12 { repository: dyn Repository });
component!(Wide13 { repository: dyn Repository });
component!(Wide14 { repository: dyn Repository });
component!(Wide15 { repository: dyn Repository });
component!(Wide16 { repository: dyn Repository });
component!(Wide17 { repository: dyn Repository });
component!(Wide18 { repository: dyn Repository });
component!(Wide19 { repository: dyn Repository });
component!(Wide20 { repository: dyn Repository });
component!(WideRoot5 {
	n01: Wide01,
	n02: Wide02,
	n03: Wide03,
	n04: Wide04,
});
component!(WideRoot20 {
	n01: Wide01,
	n02: Wide02,
	n03: Wide03,
	n04: Wide04,
	n05: Wide05,
	n06: Wide06,
	n07: Wide07,
	n08: Wide08,
	n09: Wide09,
	n10: Wide10,
	n11: Wide11,
	n12: Wide12,
	n13: Wide13,
	n14: Wide14,
	n15: Wide15,
	n16: Wide16,
	n17: Wide17,
	n18: Wide18,
	n19: Wide19,
});

// Linear: each component needs the previous one.
component!(Linear01 { repository: dyn Repository });
component!(Linear02 { n01: Linear01 });
component!(Linear03 { n02: Linear02 });
component!(Linear04 { n03: Linear03 });
component!(Linear05 { n04: Linear04 });
component!(Linear06 { n05: Linear05 });
component!(Linear07 { n06: Linear06 });
component!(Linear08 { n07: Linear07 });
component!(Linear09 { n08: Linear08 });
component!(Linear10 { n09: Linear09 });
component!(Linear11 { n10: Linear10 });
component!(Linear12 { n11: Linear11 });
component!(Linear13 { n12: Linear12 });
component!(Linear14 { n13: Linear13 });
component!(Linear15 { n14: Linear14 });
component!(Linear16 { n15: Linear15 });
component!(Linear17 { n16: Linear16 });
component!(Linear18 { n17: Linear17 });
component!(Linear19 { n18: Linear18 });
component!(Linear20 { n19: Linear19 });

// Diamond: pairs split from one component and converge on the next.
component!(Diamond01 { repository: dyn Repository });
component!(Diamond02 { n01: Diamond01 });
component!(Diamond03 { n01: Diamond01 });
component!(Diamond04 { n02: Diamond02, n03: Diamond03 });
component!(Diamond05 { n04: Diamond04 });
component!(Diamond06 { n04: Diamond04 });
component!(Diamond07 { n05: Diamond05, n06: Diamond06 });
component!(Diamond08 { n07: Diamond07 });
component!(Diamond09 { n07: Diamond07 });
component!(Diamond10 { n08: Diamond08, n09: Diamond09 });
component!(Diamond11 { n10: Diamond10 });
component!(Diamond12 { n10: Diamond10 });
component!(Diamond13 { n11: Diamond11, n12: Diamond12 });
component!(Diamond14 { n13: Diamond13 });
component!(Diamond15 { n13: Diamond13 });
component!(Diamond16 { n14: Diamond14, n15: Diamond15 });
component!(Diamond17 { n16: Diamond16 });
component!(Diamond18 { n16: Diamond16 });
component!(Diamond19 { n17: Diamond17, n18: Diamond18 });
component!(Diamond20 { n19: Diamond19 });

/// Registers every component above.
pub(crate) fn register_components(builder: &mut TypeCatalogBuilder) {
	register_all!(builder;
		Independent01, Independent02, Independent03, Independent04, Independent05,
		Independent06, Independent07, Independent08, Independent09, Independent10,
		Independent20,
	);
	register_all!(builder;
		Wide01, Wide02, Wide03, Wide04, Wide05, Wide06, Wide07, Wide08, Wide09, Wide10,
		Wide11, Wide12, Wide13, Wide14, Wide15, Wide16, Wide17, Wide18, Wide19, Wide20,
		WideRoot5, WideRoot20,
	);
	register_all!(builder;
		Linear01, Linear02, Linear03, Linear04, Linear05, Linear06, Linear07, Linear08,
		Linear09, Linear10, Linear11, Linear12, Linear13, Linear14, Linear15, Linear16,
		Linear17, Linear18, Linear19, Linear20,
	);
	register_all!(builder;
		Diamond01, Diamond02, Diamond03, Diamond04, Diamond05, Diamond06, Diamond07,
		Diamond08, Diamond09, Diamond10, Diamond11, Diamond12, Diamond13, Diamond14,
		Diamond15, Diamond16, Diamond17, Diamond18, Diamond19, Diamond20,
	);
}
