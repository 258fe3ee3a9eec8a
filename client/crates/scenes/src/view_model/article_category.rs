//! Category tab screen

use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use content::models::ArticleCategory;

use super::{
    EventLoop, NavigationFlow, ViewModel, bind, first_transform, navigate, opaque_debug,
};
use crate::navigator::ArticleCategoryNavigation;
use crate::reactive::{DisposeBag, Publisher, Subject};

#[derive(Debug, Clone, Default)]
pub struct ArticleCategoryInput {
    pub view_will_appear: Subject<()>,
    pub category_tapped: Subject<ArticleCategory>,
    pub navigation_left_button_tapped: Subject<()>,
    pub navigation_right_button_tapped: Subject<()>,
}

#[derive(Debug, Clone)]
pub struct ArticleCategoryOutput {
    pub categories: Publisher<Vec<ArticleCategory>>,
    pub navigation_flow: Publisher<NavigationFlow>,
}

pub struct ArticleCategoryViewModel {
    navigator: Arc<dyn ArticleCategoryNavigation>,
    bag: DisposeBag,
    transformed: AtomicBool,
}

impl ArticleCategoryViewModel {
    pub fn new(navigator: Arc<dyn ArticleCategoryNavigation>) -> Self {
        Self {
            navigator,
            bag: DisposeBag::new(),
            transformed: AtomicBool::new(false),
        }
    }
}

impl ViewModel for ArticleCategoryViewModel {
    type Input = ArticleCategoryInput;
    type Output = ArticleCategoryOutput;

    fn transform(&self, input: ArticleCategoryInput) -> ArticleCategoryOutput {
        let categories = input
            .view_will_appear
            .publisher()
            .map(|()| ArticleCategory::ALL.to_vec());
        let navigation_flow = input
            .navigation_left_button_tapped
            .publisher()
            .map(|()| NavigationFlow::BookmarkButtonTapped)
            .merge(
                &input
                    .navigation_right_button_tapped
                    .publisher()
                    .map(|()| NavigationFlow::MyPageButtonTapped),
            );

        if first_transform(&self.transformed, "article_category") {
            let mut event_loop = EventLoop::new();
            let navigator = self.navigator.clone();
            bind(&mut event_loop, navigation_flow.events(), move |flow| {
                navigate(flow, navigator.as_ref());
                std::future::ready(())
            });

            let navigator = self.navigator.clone();
            bind(&mut event_loop, input.category_tapped.events(), move |category| {
                navigator.article_category_tapped(category);
                std::future::ready(())
            });
            event_loop.run(&self.bag);
        }

        ArticleCategoryOutput {
            categories,
            navigation_flow,
        }
    }
}

opaque_debug!(ArticleCategoryViewModel);
