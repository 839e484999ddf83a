//! Shared fixtures for unit tests

use crate::choices::{
    ApiClient, ChoiceSchema, Deployment, FrameworkChoice, NextRouter, PackageManager, Routing,
    StateManagement, Styling, Testing,
};

/// Minimal Vite project: JavaScript, plain CSS, no optional features
pub fn vite_schema() -> ChoiceSchema {
    ChoiceSchema {
        package_manager: PackageManager::Npm,
        framework: FrameworkChoice::Vite {
            routing: Routing::None,
        },
        typescript: false,
        linting: true,
        styling: Styling::Css,
        state_management: StateManagement::None,
        api: ApiClient::None,
        testing: Testing::None,
        deployment: Deployment::None,
        init_git: true,
        open_editor: false,
    }
}

pub fn next_schema(router: NextRouter) -> ChoiceSchema {
    ChoiceSchema {
        framework: FrameworkChoice::NextJs { router },
        ..vite_schema()
    }
}

/// Every combination of the axes that influence generated output
pub fn matrix() -> Vec<ChoiceSchema> {
    let frameworks = [
        FrameworkChoice::Vite {
            routing: Routing::None,
        },
        FrameworkChoice::Vite {
            routing: Routing::ReactRouter,
        },
        FrameworkChoice::NextJs {
            router: NextRouter::App,
        },
        FrameworkChoice::NextJs {
            router: NextRouter::Pages,
        },
    ];

    let mut out = Vec::new();
    for framework in frameworks {
        for typescript in [false, true] {
            for linting in [false, true] {
                for &styling in Styling::ALL {
                    for &state_management in StateManagement::ALL {
                        for &api in ApiClient::ALL {
                            for &testing in Testing::ALL {
                                for &deployment in Deployment::ALL {
                                    out.push(ChoiceSchema {
                                        framework,
                                        typescript,
                                        linting,
                                        styling,
                                        state_management,
                                        api,
                                        testing,
                                        deployment,
                                        ..vite_schema()
                                    });
                                }
                            }
                        }
                    }
                }
            }
        }
    }
    out
}
