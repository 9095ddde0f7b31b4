use crate::middleware::authentication::*;
use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse},
    Error,
};
use futures::{
    future::{FutureExt, LocalBoxFuture},
    task::{Context, Poll},
};
use std::cell::RefCell;
use std::rc::Rc;

pub struct ManagerMiddleware<S> {
    pub service: Rc<RefCell<S>>,
}

impl<S, B> Service<ServiceRequest> for ManagerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = S::Error;
    type Future = LocalBoxFuture<'static, Result<ServiceResponse<B>, Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        if let Ok(service) = self.service.try_borrow_mut() {
            service.poll_ready(ctx)
        } else {
            Poll::Pending
        }
    }

    fn call(&self, mut req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        async move {
            // credentials that can't be resolved leave the request anonymous,
            // gated handlers redirect through their extractors
            let authenticated = match method::try_oauth(&mut req).await {
                Ok(authenticated) => authenticated,
                Err(msg) => {
                    tracing::warn!("Bearer authentication skipped: {}", msg);
                    false
                }
            };
            if !authenticated {
                if let Err(msg) = method::try_cookie(&mut req).await {
                    tracing::warn!("Cookie authentication skipped: {}", msg);
                }
            }

            let fut = service.borrow_mut().call(req);
            fut.await
        }
        .boxed_local()
    }
}
