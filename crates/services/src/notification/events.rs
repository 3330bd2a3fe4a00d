use bson::oid::ObjectId;
use taskhub_db::models::ReferenceType;

use super::dispatcher::NewNotification;

pub const COMMENT_ADDED: &str = "comment.added";
pub const TASK_ASSIGNED: &str = "task.assigned";
pub const INVITATION_SENT: &str = "invitation.sent";
pub const INVITATION_ACCEPTED: &str = "invitation.accepted";
pub const MEMBER_ADDED: &str = "member.added";

/// A committed domain action that may owe someone a notification.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainEvent {
    /// A comment or reply was posted on a task.
    CommentAdded {
        task_id: ObjectId,
        actor_id: ObjectId,
        assignee_id: Option<ObjectId>,
        creator_id: ObjectId,
    },
    /// A task was created with, or updated to, an assignee.
    TaskAssigned {
        task_id: ObjectId,
        actor_id: ObjectId,
        previous_assignee_id: Option<ObjectId>,
        assignee_id: ObjectId,
        newly_created: bool,
    },
    InvitationSent {
        project_id: ObjectId,
        inviter_id: ObjectId,
        invitee_id: ObjectId,
    },
    InvitationAccepted {
        project_id: ObjectId,
        inviter_id: ObjectId,
        accepter_id: ObjectId,
    },
    MemberAdded {
        project_id: ObjectId,
        owner_id: ObjectId,
        member_id: ObjectId,
    },
}

impl DomainEvent {
    pub fn actor_id(&self) -> ObjectId {
        match self {
            DomainEvent::CommentAdded { actor_id, .. } => *actor_id,
            DomainEvent::TaskAssigned { actor_id, .. } => *actor_id,
            DomainEvent::InvitationSent { inviter_id, .. } => *inviter_id,
            DomainEvent::InvitationAccepted { accepter_id, .. } => *accepter_id,
            DomainEvent::MemberAdded { owner_id, .. } => *owner_id,
        }
    }

    /// One notice per recipient. Never includes the actor.
    pub fn notices(&self) -> Vec<NewNotification> {
        let actor_id = self.actor_id();
        let mut notices = Vec::new();

        let mut push = |recipient_id: ObjectId,
                        action: &str,
                        reference_type: ReferenceType,
                        related_id: ObjectId,
                        message: &str| {
            if recipient_id == actor_id {
                return;
            }
            notices.push(NewNotification {
                recipient_id,
                actor_id,
                action: action.to_string(),
                reference_type,
                related_id,
                message: message.to_string(),
            });
        };

        match *self {
            DomainEvent::CommentAdded {
                task_id,
                assignee_id,
                creator_id,
                ..
            } => {
                if let Some(assignee_id) = assignee_id {
                    push(
                        assignee_id,
                        COMMENT_ADDED,
                        ReferenceType::Task,
                        task_id,
                        "You have a new comment on your task",
                    );
                }
                push(
                    creator_id,
                    COMMENT_ADDED,
                    ReferenceType::Task,
                    task_id,
                    "New comment on your task",
                );
            }
            DomainEvent::TaskAssigned {
                task_id,
                previous_assignee_id,
                assignee_id,
                newly_created,
                ..
            } => {
                if previous_assignee_id != Some(assignee_id) {
                    let message = if newly_created {
                        "You have been assigned to a new task"
                    } else {
                        "You have been assigned to a task"
                    };
                    push(assignee_id, TASK_ASSIGNED, ReferenceType::Task, task_id, message);
                }
            }
            DomainEvent::InvitationSent {
                project_id,
                invitee_id,
                ..
            } => push(
                invitee_id,
                INVITATION_SENT,
                ReferenceType::Project,
                project_id,
                "You have been invited to a project",
            ),
            DomainEvent::InvitationAccepted {
                project_id,
                inviter_id,
                ..
            } => push(
                inviter_id,
                INVITATION_ACCEPTED,
                ReferenceType::Project,
                project_id,
                "Your invitation has been accepted",
            ),
            DomainEvent::MemberAdded {
                project_id,
                member_id,
                ..
            } => push(
                member_id,
                MEMBER_ADDED,
                ReferenceType::Project,
                project_id,
                "You have been added to a project",
            ),
        }

        notices
    }
}
